//! Integration test common infrastructure.
//!
//! Provides a tracked "network" with a recording anomaly sink and helpers
//! for driving it with protocol events.

use std::sync::Arc;

use slirc_state::{Anomaly, Config, Event, RecordingSink, TrackResult, Tracker};

/// A tracker plus the sink it reports into.
pub struct TestNetwork {
    pub tracker: Tracker,
    pub sink: Arc<RecordingSink>,
}

#[allow(dead_code)]
impl TestNetwork {
    /// A fresh tracker whose local identity is `nick`.
    pub fn new(nick: &str) -> Self {
        Self::with_config(Config::for_nick(nick))
    }

    pub fn with_config(config: Config) -> Self {
        let sink = Arc::new(RecordingSink::new());
        let tracker = Tracker::with_sink(&config, sink.clone());
        Self { tracker, sink }
    }

    pub fn apply(&mut self, event: Event) -> TrackResult {
        self.tracker.apply(&event)
    }

    pub fn join(&mut self, nick: &str, channel: &str) -> TrackResult {
        self.apply(Event::Join {
            nick: nick.to_string(),
            ident: nick.to_string(),
            host: format!("{nick}.example"),
            channel: channel.to_string(),
        })
    }

    pub fn part(&mut self, nick: &str, channel: &str) -> TrackResult {
        self.apply(Event::Part {
            nick: nick.to_string(),
            channel: channel.to_string(),
            reason: None,
        })
    }

    pub fn quit(&mut self, nick: &str) -> TrackResult {
        self.apply(Event::Quit {
            nick: nick.to_string(),
            reason: None,
        })
    }

    pub fn rename(&mut self, old: &str, new: &str) -> TrackResult {
        self.apply(Event::NickChange {
            old: old.to_string(),
            new: new.to_string(),
        })
    }

    pub fn mode(&mut self, channel: &str, modes: &str, args: &[&str]) -> TrackResult {
        self.apply(Event::ChannelMode {
            channel: channel.to_string(),
            modes: modes.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.sink.anomalies()
    }

    /// Panic with the broken invariant, if any.
    pub fn assert_consistent(&self) {
        if let Err(broken) = self.tracker.check_invariants() {
            panic!("invariant broken: {broken}");
        }
    }
}
