//! State management module.
//!
//! Contains the [`Tracker`] (entity store plus association manager) and the
//! records it owns.

mod association;
mod channel;
mod nick;
mod render;
mod tracker;

pub use channel::Channel;
pub use nick::Nick;
pub use render::{ChannelDump, NickDump};
pub use tracker::Tracker;
