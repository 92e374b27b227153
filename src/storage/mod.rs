//! Persistence of the shortcut configuration.

pub mod config;

pub use config::{ConfigSource, ConfigStore};
