//! Display configuration types for the bar widget

pub mod bar;

pub use bar::{BarOrientation, BarSettings, ValueRange};
