//! Message source trait and related types

use anyhow::Result;
use serde_json::Value;
use std::time::Duration;
use topic_bar_types::{RenderState, Subscription, Topic};

/// Metadata about a message source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this source type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of where messages come from
    pub description: String,
    /// Recommended delay between frames
    pub default_interval: Duration,
}

/// Receives subscription requests from the widget.
///
/// A call replaces the previous subscription set; the host works out what to
/// unsubscribe.
pub trait SubscriptionHost {
    fn subscribe(&mut self, subscriptions: &[Subscription]);
}

/// Trait for all message sources
///
/// A message source plays the host's delivery role: it hands the widget one
/// batch of decoded messages per render cycle, restricted to the subscribed
/// channels.
pub trait MessageSource: SubscriptionHost + Send {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Channels currently known to the source
    fn topics(&self) -> Vec<Topic>;

    /// Produce the next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<RenderState>>;

    /// Channels currently subscribed
    fn subscriptions(&self) -> Vec<Subscription> {
        Vec::new()
    }

    /// Configure the source with source-specific settings
    fn configure(&mut self, _config: &Value) -> Result<()> {
        Ok(())
    }
}

/// Type-erased message source for dynamic dispatch
pub type BoxedMessageSource = Box<dyn MessageSource>;
