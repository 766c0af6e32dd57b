//! Bar widget: selector, display state and the per-frame update cycle.
//!
//! The widget reacts to two events, both delivered serially by the host:
//! a settings change ([`BarWidget::update_settings`]) and a message batch
//! ([`BarWidget::render`]). Neither blocks. The only mutable state is the
//! [`DisplayState`], owned by the widget.

use log::{debug, trace};
use topic_bar_types::{
    BarOrientation, BarSettings, RenderState, Selector, Subscription, Topic, ValueRange,
};

use crate::data_source::SubscriptionHost;
use crate::extract::extract;
use crate::normalize::normalize;
use crate::settings::{selector_suggestions, SettingsUpdate};

/// Whether the widget currently holds a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    /// No channel, or nothing extracted yet
    Idle,
    /// A scalar is held
    Live,
}

/// Latest scalar and the percentage derived from it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayState {
    pub scalar: Option<f64>,
    pub percentage: f64,
}

impl DisplayState {
    pub fn phase(&self) -> WidgetPhase {
        match self.scalar {
            Some(_) => WidgetPhase::Live,
            None => WidgetPhase::Idle,
        }
    }

    fn set_scalar(&mut self, scalar: Option<f64>, range: ValueRange) {
        self.scalar = scalar;
        self.percentage = normalize(scalar, range);
    }

    fn renormalize(&mut self, range: ValueRange) {
        self.percentage = normalize(self.scalar, range);
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the presentation layer receives each frame
#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub percentage: f64,
    pub scalar: Option<f64>,
    pub color: String,
    pub orientation: BarOrientation,
}

impl BarView {
    /// Label shown on the bar: the scalar to two decimals, or the whole
    /// percentage when there is no scalar.
    pub fn display_text(&self) -> String {
        match self.scalar {
            Some(value) => format!("{:.2}", value),
            None => format!("{}", self.percentage.floor()),
        }
    }
}

/// Completion token for one rendered frame.
///
/// The host must not deliver the next frame before taking this token.
#[must_use = "acknowledge the frame before delivering the next one"]
#[derive(Debug, PartialEq, Eq)]
pub struct RenderDone {
    frame: u64,
}

impl RenderDone {
    /// Sequence number of the completed frame (starting at 1)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Consume the token, returning the frame number
    pub fn acknowledge(self) -> u64 {
        self.frame
    }
}

/// A running bar widget instance
pub struct BarWidget {
    settings: BarSettings,
    selector: Selector,
    state: DisplayState,
    topics: Vec<Topic>,
    frames: u64,
}

impl BarWidget {
    /// Create a widget from (possibly restored) settings and issue the
    /// initial subscription.
    pub fn new<H: SubscriptionHost + ?Sized>(settings: BarSettings, host: &mut H) -> Self {
        let selector = settings.selector();
        let widget = Self {
            settings,
            selector,
            state: DisplayState::default(),
            topics: Vec::new(),
            frames: 0,
        };
        widget.subscribe(host);
        widget
    }

    /// Apply one settings change.
    ///
    /// A change of channel resets the display state and re-targets the
    /// subscription in the same step, so no stale value is ever shown for the
    /// new channel. Returns the full settings for the host to persist.
    pub fn update_settings<H: SubscriptionHost + ?Sized>(
        &mut self,
        update: SettingsUpdate,
        host: &mut H,
    ) -> &BarSettings {
        let affects_range = update.affects_range();
        update.apply(&mut self.settings);

        let selector = self.settings.selector();
        if selector.channel() != self.selector.channel() {
            debug!(
                "Channel changed from {:?} to {:?}, resetting display state",
                self.selector.channel(),
                selector.channel()
            );
            self.selector = selector;
            self.state.reset();
            self.subscribe(host);
        } else if selector != self.selector {
            debug!("Field path changed to {:?}", selector.path().to_string());
            self.selector = selector;
        }

        if affects_range {
            self.state.renormalize(self.settings.range());
        }
        &self.settings
    }

    /// Process one frame from the host.
    ///
    /// Every message on the subscribed channel is extracted in arrival order;
    /// each one overwrites the scalar, so the last one wins. Frames without a
    /// matching message leave the state untouched.
    pub fn render(&mut self, frame: &RenderState) -> RenderDone {
        if let Some(topics) = &frame.topics {
            self.topics = topics.clone();
        }

        if !self.selector.is_unset() {
            let range = self.settings.range();
            let channel = self.selector.channel();
            let path = self.selector.path();
            let before = self.state.phase();

            for event in frame.current_frame.iter().filter(|e| e.channel == channel) {
                let scalar = extract(&event.message, path);
                trace!("{} -> {:?}", self.selector, scalar);
                self.state.set_scalar(scalar, range);
            }

            if before != self.state.phase() {
                debug!("Widget on {:?} is now {:?}", channel, self.state.phase());
            }
        }

        self.frames += 1;
        RenderDone { frame: self.frames }
    }

    /// Current view for the presentation layer
    pub fn view(&self) -> BarView {
        BarView {
            percentage: self.state.percentage,
            scalar: self.state.scalar,
            color: self.settings.bar_color.clone(),
            orientation: self.settings.orientation,
        }
    }

    pub fn settings(&self) -> &BarSettings {
        &self.settings
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn phase(&self) -> WidgetPhase {
        self.state.phase()
    }

    /// Known topics, as last reported by the host
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Selector completions for the settings editor
    pub fn suggestions(&self) -> Vec<String> {
        selector_suggestions(&self.topics)
    }

    fn subscribe<H: SubscriptionHost + ?Sized>(&self, host: &mut H) {
        let subscriptions: Vec<Subscription> = if self.selector.is_unset() {
            Vec::new()
        } else {
            vec![Subscription {
                channel: self.selector.channel().to_string(),
            }]
        };
        debug!("Subscribing to {:?}", subscriptions);
        host.subscribe(&subscriptions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use topic_bar_types::MessageEvent;

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<Vec<Subscription>>,
    }

    impl SubscriptionHost for RecordingHost {
        fn subscribe(&mut self, subscriptions: &[Subscription]) {
            self.calls.push(subscriptions.to_vec());
        }
    }

    fn settings(topic_field: &str) -> BarSettings {
        BarSettings {
            topic_field: topic_field.to_string(),
            ..Default::default()
        }
    }

    fn frame(events: Vec<(&str, serde_json::Value)>) -> RenderState {
        RenderState::with_messages(
            events
                .into_iter()
                .map(|(channel, message)| MessageEvent::new(channel, message))
                .collect(),
        )
    }

    fn channels(call: &[Subscription]) -> Vec<&str> {
        call.iter().map(|s| s.channel.as_str()).collect()
    }

    #[test]
    fn test_initial_state_is_idle() {
        let mut host = RecordingHost::default();
        let widget = BarWidget::new(BarSettings::default(), &mut host);

        assert_eq!(widget.phase(), WidgetPhase::Idle);
        assert_eq!(widget.state(), DisplayState { scalar: None, percentage: 0.0 });
        // Empty selector subscribes to nothing
        assert_eq!(host.calls, vec![Vec::<Subscription>::new()]);
    }

    #[test]
    fn test_end_to_end_temperature() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu.temperature"), &mut host);
        assert_eq!(channels(&host.calls[0]), vec!["/imu"]);

        let done = widget.render(&frame(vec![("/imu", json!({"temperature": 37.5}))]));
        assert_eq!(done.acknowledge(), 1);

        assert_eq!(widget.phase(), WidgetPhase::Live);
        assert_eq!(widget.state().scalar, Some(37.5));
        assert_eq!(widget.state().percentage, 37.5);
    }

    #[test]
    fn test_last_message_in_batch_wins() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu"), &mut host);

        let _ = widget.render(&frame(vec![
            ("/imu", json!({"value": 10})),
            ("/gps", json!({"value": 99})),
            ("/imu", json!({"value": 20})),
        ]));

        assert_eq!(widget.state().scalar, Some(20.0));
        assert_eq!(widget.state().percentage, 20.0);
    }

    #[test]
    fn test_unmatched_message_overwrites_with_absent() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu.x"), &mut host);

        let _ = widget.render(&frame(vec![
            ("/imu", json!({"x": 10})),
            ("/imu", json!({"x": "bad"})),
        ]));

        assert_eq!(widget.state().scalar, None);
        assert_eq!(widget.phase(), WidgetPhase::Idle);
    }

    #[test]
    fn test_scalar_persists_across_empty_frames() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu.x"), &mut host);

        let _ = widget.render(&frame(vec![("/imu", json!({"x": 42}))]));
        let _ = widget.render(&RenderState::default());
        let done = widget.render(&frame(vec![("/gps", json!({"x": 7}))]));

        assert_eq!(done.frame(), 3);
        assert_eq!(widget.state().scalar, Some(42.0));
        assert_eq!(widget.phase(), WidgetPhase::Live);
    }

    #[test]
    fn test_channel_switch_resets_before_next_message() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu.temperature"), &mut host);
        let _ = widget.render(&frame(vec![("/imu", json!({"temperature": 80}))]));
        assert_eq!(widget.state().scalar, Some(80.0));

        widget.update_settings(SettingsUpdate::TopicField("/gps.altitude".into()), &mut host);

        assert_eq!(widget.state(), DisplayState::default());
        assert_eq!(widget.phase(), WidgetPhase::Idle);
        assert_eq!(channels(host.calls.last().unwrap()), vec!["/gps"]);

        // Late /imu traffic no longer counts
        let _ = widget.render(&frame(vec![("/imu", json!({"temperature": 81}))]));
        assert_eq!(widget.state().scalar, None);

        let _ = widget.render(&frame(vec![("/gps", json!({"altitude": 12.5}))]));
        assert_eq!(widget.state().scalar, Some(12.5));
    }

    #[test]
    fn test_path_change_keeps_scalar_and_subscription() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu.x"), &mut host);
        let _ = widget.render(&frame(vec![("/imu", json!({"x": 5, "y": 6}))]));

        widget.update_settings(SettingsUpdate::TopicField("/imu.y".into()), &mut host);

        assert_eq!(host.calls.len(), 1);
        assert_eq!(widget.state().scalar, Some(5.0));
        assert_eq!(widget.selector().path().to_string(), "y");

        let _ = widget.render(&frame(vec![("/imu", json!({"x": 5, "y": 6}))]));
        assert_eq!(widget.state().scalar, Some(6.0));
    }

    #[test]
    fn test_range_change_renormalizes_held_scalar() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu.x"), &mut host);
        let _ = widget.render(&frame(vec![("/imu", json!({"x": 50}))]));
        assert_eq!(widget.state().percentage, 50.0);

        widget.update_settings(SettingsUpdate::MaxValue(200.0), &mut host);
        assert_eq!(widget.state().percentage, 25.0);

        widget.update_settings(SettingsUpdate::MinValue(200.0), &mut host);
        assert_eq!(widget.state().percentage, 0.0);
        assert_eq!(widget.state().scalar, Some(50.0));
    }

    #[test]
    fn test_clearing_selector_unsubscribes() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu"), &mut host);
        let _ = widget.render(&frame(vec![("/imu", json!(3))]));

        let persisted =
            widget.update_settings(SettingsUpdate::TopicField(String::new()), &mut host);
        assert_eq!(persisted.topic_field, "");

        assert!(host.calls.last().unwrap().is_empty());
        assert_eq!(widget.state(), DisplayState::default());

        let _ = widget.render(&frame(vec![("", json!(3))]));
        assert_eq!(widget.state().scalar, None);
    }

    #[test]
    fn test_view_passes_style_through() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(settings("/imu"), &mut host);
        widget.update_settings(SettingsUpdate::BarColor("#ff0000".into()), &mut host);
        widget.update_settings(
            SettingsUpdate::Orientation(BarOrientation::Vertical),
            &mut host,
        );
        let _ = widget.render(&frame(vec![("/imu", json!({"value": 12.346}))]));

        let view = widget.view();
        assert_eq!(view.color, "#ff0000");
        assert_eq!(view.orientation, BarOrientation::Vertical);
        assert_eq!(view.display_text(), "12.35");
    }

    #[test]
    fn test_display_text_without_scalar() {
        let view = BarView {
            percentage: 0.0,
            scalar: None,
            color: String::new(),
            orientation: BarOrientation::Horizontal,
        };
        assert_eq!(view.display_text(), "0");
    }

    #[test]
    fn test_topics_feed_suggestions() {
        let mut host = RecordingHost::default();
        let mut widget = BarWidget::new(BarSettings::default(), &mut host);
        let _ = widget.render(&RenderState {
            current_frame: Vec::new(),
            topics: Some(vec![Topic::new("/imu")]),
        });
        // Unchanged topics keep the previous list
        let _ = widget.render(&RenderState::default());

        assert_eq!(widget.topics().len(), 1);
        assert_eq!(widget.suggestions()[0], "/imu");
        assert!(widget.suggestions().contains(&"/imu.temperature".to_string()));
    }
}
