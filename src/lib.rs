//! topic-bar: a live telemetry bar gauge
//!
//! This library provides the host side of the topic-bar widget:
//! - Message sources that feed the widget one batch per frame
//! - Displayers that render the widget's view
//! - Configuration management
//!
//! The extraction pipeline itself lives in `topic-bar-core`.

pub mod config;
pub mod displayers;
pub mod sources;

// Re-export commonly used types
pub use config::AppConfig;
pub use topic_bar_core::{BarView, BarWidget, Displayer, MessageSource, SettingsUpdate};
