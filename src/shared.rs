//! A tracker shared between threads.
//!
//! The tracker itself is not synchronized. [`SharedTracker`] puts the whole
//! graph behind one `RwLock`, so membership maps and the privilege records
//! they point at are always guarded together.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::Config;
use crate::error::TrackResult;
use crate::events::Event;
use crate::observer::AnomalySink;
use crate::state::Tracker;

#[derive(Debug, Clone)]
pub struct SharedTracker {
    inner: Arc<RwLock<Tracker>>,
}

impl SharedTracker {
    pub fn new(config: &Config) -> Self {
        Self::from(Tracker::new(config))
    }

    pub fn with_sink(config: &Config, sink: impl AnomalySink + 'static) -> Self {
        Self::from(Tracker::with_sink(config, sink))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Tracker> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Tracker> {
        self.inner.write()
    }

    /// Apply one event under the write lock.
    pub fn apply(&self, event: &Event) -> TrackResult {
        self.inner.write().apply(event)
    }
}

impl From<Tracker> for SharedTracker {
    fn from(tracker: Tracker) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tracker)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn join(nick: &str, channel: &str) -> Event {
        Event::Join {
            nick: nick.into(),
            ident: String::new(),
            host: String::new(),
            channel: channel.into(),
        }
    }

    #[test]
    fn test_concurrent_producers() {
        let shared = SharedTracker::new(&Config::for_nick("me"));
        shared.apply(&join("me", "#rust")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        shared.apply(&join(&format!("u{t}_{i}"), "#rust")).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let tracker = shared.read();
        let chan = tracker.find_channel("#rust").unwrap();
        assert_eq!(tracker.channel(chan).unwrap().member_count(), 101);
        assert!(tracker.check_invariants().is_ok());
    }

    #[test]
    fn test_write_guard_mutates() {
        let shared = SharedTracker::new(&Config::for_nick("me"));
        let chan = shared.write().create_channel("#rust");
        assert_eq!(shared.read().find_channel("#rust"), Some(chan));
    }
}
