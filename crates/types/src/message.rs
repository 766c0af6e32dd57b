//! Host-side message delivery types

use serde::{Deserialize, Serialize};

use crate::payload::MessagePayload;

/// A channel known to the host (informational)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    /// Message schema name, when the host knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_name: None,
        }
    }
}

/// One decoded message on a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    #[serde(alias = "topic")]
    pub channel: String,
    pub message: MessagePayload,
}

impl MessageEvent {
    pub fn new(channel: impl Into<String>, message: impl Into<MessagePayload>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

/// Subscription request sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub channel: String,
}

/// Everything the host hands over for one render cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    /// Messages that arrived since the previous frame, in arrival order
    pub current_frame: Vec<MessageEvent>,
    /// Known channels; `None` when unchanged since the last frame
    pub topics: Option<Vec<Topic>>,
}

impl RenderState {
    pub fn with_messages(current_frame: Vec<MessageEvent>) -> Self {
        Self {
            current_frame,
            topics: None,
        }
    }
}
