//! `channel.field` selectors
//!
//! A selector names the channel to subscribe to and, optionally, the field
//! path to read inside each message on that channel:
//!
//! ```text
//! /imu                  -> channel "/imu", no path (heuristic field discovery)
//! /imu.temperature      -> channel "/imu", path ["temperature"]
//! /odom.pose.position.x -> channel "/odom", path ["pose", "position", "x"]
//! ```
//!
//! Resolution never fails; malformed input degrades to a best-effort split.

use std::fmt;

/// Ordered key sequence used to walk into a message payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Split a dotted path string into keys. An empty string is the empty path.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }
        Self(path.split('.').map(str::to_string).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A resolved selector: subscription channel plus field path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    channel: String,
    path: FieldPath,
}

impl Selector {
    /// Resolve a raw selector string.
    ///
    /// The first `.`-separated segment is the channel; everything after it is the
    /// field path. Channel names therefore cannot contain `.`.
    pub fn resolve(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Self::default(),
        };

        match raw.split_once('.') {
            None => Self {
                channel: raw.to_string(),
                path: FieldPath::default(),
            },
            Some((channel, field)) => Self {
                channel: channel.to_string(),
                path: FieldPath::parse(field),
            },
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// True when no channel is configured
    pub fn is_unset(&self) -> bool {
        self.channel.is_empty()
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::resolve(Some(raw))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.channel)
        } else {
            write!(f, "{}.{}", self.channel, self.path)
        }
    }
}
