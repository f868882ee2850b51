mod favorites;
mod preferences;

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use preferences::{Connection, Preferences};
