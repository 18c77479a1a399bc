//! slirc-state - client-side IRC state tracking.
//!
//! Mirrors the nicks and channels one connection can see, and keeps every
//! membership mirrored between the channel and nick sides with a single
//! shared privilege record. The [`Tracker`] owns everything; callers hold
//! `Copy` handles ([`NickId`], [`ChannelId`], [`PrivilegeId`]).
//!
//! ```
//! use slirc_state::{Config, Tracker};
//!
//! let mut tracker = Tracker::new(&Config::for_nick("slircbot"));
//! let me = tracker.me();
//! let chan = tracker.create_channel("#rust");
//! tracker.join_channel(chan, me).unwrap();
//!
//! let alice = tracker.create_nick("alice", "al", "Alice", "example.org");
//! let p = tracker.join_nick(alice, chan).unwrap();
//! tracker.privileges_mut(p).unwrap().op = true;
//!
//! tracker.leave_channel(chan, me).unwrap();
//! assert!(tracker.find_channel("#rust").is_none());
//! assert!(tracker.find_nick("alice").is_none());
//! ```

pub mod casemap;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod modes;
pub mod observer;
pub mod shared;
pub mod state;

pub use casemap::Casemapping;
pub use config::Config;
pub use error::{Anomaly, TrackResult};
pub use events::Event;
pub use ids::{ChannelId, NickId, PrivilegeId};
pub use observer::{AnomalySink, RecordingSink, TracingSink};
pub use shared::SharedTracker;
pub use state::{Channel, Nick, Tracker};
