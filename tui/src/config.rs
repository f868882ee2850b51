use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use efem_core::api::DEFAULT_BASE_URL;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Base URL of the efemérides API
    pub api_base_url: String,
    /// Event-loop tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            tick_rate_ms: 250,
        }
    }
}

/// Load the config, writing defaults on first run.
///
/// The API base URL can be overridden with the `EFEM_API_URL` environment
/// variable, mainly for development against a local server.
pub fn load_config(path: &PathBuf) -> Config {
    let mut config = if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).expect("Failed to serialize default config");
        fs::write(path, toml).expect("Failed to write default config");
        config
    } else {
        let content = fs::read_to_string(path).expect("Failed to read config file");
        toml::from_str(&content).expect("Failed to parse config file")
    };

    if let Ok(url) = std::env::var("EFEM_API_URL") {
        if !url.is_empty() {
            config.api_base_url = url;
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_written_on_first_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = load_config(&path);
        assert!(path.exists());
        assert_eq!(config.tick_rate_ms, Config::default().tick_rate_ms);

        let reloaded = load_config(&path);
        assert_eq!(reloaded.tick_rate_ms, config.tick_rate_ms);
    }
}
