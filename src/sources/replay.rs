//! Replay message source
//!
//! Reads recorded message events from a JSON-lines file, one event per line:
//!
//! ```text
//! {"channel": "/imu", "message": {"temperature": 37.5}}
//! {"channel": "/gps", "message": {"altitude": 112.0, "fix": "3d"}}
//! ```
//!
//! Events are delivered in file order, `batch_size` at a time. Only channels
//! the widget subscribed to are passed through.

use std::collections::{HashSet, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use topic_bar_core::{
    MessageEvent, MessageSource, RenderState, SourceMetadata, Subscription, SubscriptionHost,
    Topic,
};

/// Configuration for the replay source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySourceConfig {
    /// Recording to play back
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Events per frame
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Delay between frames in milliseconds
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
}

fn default_batch_size() -> usize {
    1
}

fn default_update_interval() -> u64 {
    100
}

impl Default for ReplaySourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            batch_size: default_batch_size(),
            update_interval_ms: default_update_interval(),
        }
    }
}

/// Replays a recorded message log
pub struct ReplaySource {
    metadata: SourceMetadata,
    batch_size: usize,
    pending: VecDeque<MessageEvent>,
    topics: Vec<Topic>,
    topics_sent: bool,
    subscribed: HashSet<String>,
}

impl ReplaySource {
    pub fn new() -> Self {
        Self {
            metadata: SourceMetadata {
                id: "replay".to_string(),
                name: "Replay".to_string(),
                description: "Plays back message events from a JSON-lines file".to_string(),
                default_interval: Duration::from_millis(default_update_interval()),
            },
            batch_size: default_batch_size(),
            pending: VecDeque::new(),
            topics: Vec::new(),
            topics_sent: false,
            subscribed: HashSet::new(),
        }
    }

    /// Load events from any line-oriented reader.
    ///
    /// Blank lines are ignored; lines that are not valid events are skipped
    /// with a warning. Returns the number of events loaded.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut seen: HashSet<String> = self.topics.iter().map(|t| t.name.clone()).collect();
        let mut loaded = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<MessageEvent>(line) {
                Ok(event) => {
                    if seen.insert(event.channel.clone()) {
                        self.topics.push(Topic::new(event.channel.clone()));
                    }
                    self.pending.push_back(event);
                    loaded += 1;
                }
                Err(e) => warn!("Skipping line {}: {}", index + 1, e),
            }
        }

        self.topics_sent = false;
        Ok(loaded)
    }

    /// Number of events not yet delivered
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Default for ReplaySource {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionHost for ReplaySource {
    fn subscribe(&mut self, subscriptions: &[Subscription]) {
        self.subscribed = subscriptions.iter().map(|s| s.channel.clone()).collect();
    }
}

impl MessageSource for ReplaySource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn topics(&self) -> Vec<Topic> {
        self.topics.clone()
    }

    fn next_frame(&mut self) -> Result<Option<RenderState>> {
        if self.pending.is_empty() {
            return Ok(None);
        }

        let take = self.batch_size.min(self.pending.len());
        let current_frame = self
            .pending
            .drain(..take)
            .filter(|event| self.subscribed.contains(&event.channel))
            .collect();

        let topics = if self.topics_sent {
            None
        } else {
            self.topics_sent = true;
            Some(self.topics.clone())
        };

        Ok(Some(RenderState {
            current_frame,
            topics,
        }))
    }

    fn subscriptions(&self) -> Vec<Subscription> {
        let mut channels: Vec<&String> = self.subscribed.iter().collect();
        channels.sort();
        channels
            .into_iter()
            .map(|channel| Subscription {
                channel: channel.clone(),
            })
            .collect()
    }

    fn configure(&mut self, config: &Value) -> Result<()> {
        let config: ReplaySourceConfig =
            serde_json::from_value(config.clone()).context("Invalid replay source config")?;

        self.batch_size = config.batch_size.max(1);
        self.metadata.default_interval = Duration::from_millis(config.update_interval_ms);

        if let Some(path) = &config.path {
            let file = File::open(path)
                .with_context(|| format!("Failed to open recording {}", path.display()))?;
            let loaded = self.load(BufReader::new(file))?;
            info!("Loaded {} events from {}", loaded, path.display());
        }
        Ok(())
    }
}
