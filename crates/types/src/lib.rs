//! topic-bar-types: Shared data types for the topic-bar telemetry gauge.
//!
//! This crate contains pure data types (payloads, selectors, settings, host
//! message types) shared across the topic-bar crates. It has no rendering or
//! I/O dependencies, making it suitable as a foundation layer.

pub mod color;
pub mod display_configs;
pub mod message;
pub mod payload;
pub mod selector;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use display_configs::{BarOrientation, BarSettings, ValueRange};
pub use message::{MessageEvent, RenderState, Subscription, Topic};
pub use payload::MessagePayload;
pub use selector::{FieldPath, Selector};
