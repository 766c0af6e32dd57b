//! topic-bar-core: value extraction, normalization and widget state.
//!
//! This crate contains the extraction pipeline (selector → field lookup →
//! percentage), the [`BarWidget`] that drives it frame by frame, the host-facing
//! traits (MessageSource, SubscriptionHost, Displayer) and the global Registry.

pub mod constants;
mod data_source;
mod displayer;
mod error;
pub mod extract;
pub mod normalize;
mod registry;
mod settings;
mod widget;

pub use constants::{PERCENT_MAX, PERCENT_MIN, PRIORITY_FIELDS, SUGGESTED_FIELDS};
pub use data_source::{BoxedMessageSource, MessageSource, SourceMetadata, SubscriptionHost};
pub use displayer::{BoxedDisplayer, Displayer};
pub use error::{BarError, BarResult};
pub use extract::extract;
pub use normalize::normalize;
pub use registry::{global_registry, DisplayerFactory, Registry, SourceFactory};
pub use settings::{selector_suggestions, SettingsUpdate};
pub use widget::{BarView, BarWidget, DisplayState, RenderDone, WidgetPhase};

// Re-export types used in trait signatures for convenience
pub use topic_bar_types::{
    BarOrientation, BarSettings, FieldPath, MessageEvent, MessagePayload, RenderState, Selector,
    Subscription, Topic, ValueRange,
};
