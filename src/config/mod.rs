//! Configuration management

mod migration;
mod settings;

pub use migration::upgrade;
pub use settings::{AppConfig, DisplayConfig, CONFIG_VERSION};
