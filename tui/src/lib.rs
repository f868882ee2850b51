pub mod app;
pub mod config;
pub mod event;
pub mod fetch;
pub mod ui;

pub use crate::app::App;
pub use crate::event::{Event, EventHandler};
