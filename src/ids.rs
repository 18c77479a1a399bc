//! Stable handles into the tracker's arenas.
//!
//! Handles are plain integers drawn from one monotonically increasing
//! counter, so a handle is never reused: once its record is gone it simply
//! resolves to nothing.

use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Raw numeric value, useful for logging.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle to a tracked [`Nick`](crate::state::Nick).
    NickId,
    "N"
);
handle!(
    /// Handle to a tracked [`Channel`](crate::state::Channel).
    ChannelId,
    "C"
);
handle!(
    /// Handle to the privilege record shared by both sides of one membership.
    PrivilegeId,
    "P"
);

/// Hands out fresh handles.
#[derive(Debug)]
pub struct IdGenerator {
    counter: u64,
}

/// Start at 1 so 0 never shows up in logs as a valid handle.
const ID_COUNTER_START: u64 = 1;

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: ID_COUNTER_START,
        }
    }

    fn bump(&mut self) -> u64 {
        let n = self.counter;
        self.counter += 1;
        n
    }

    pub fn nick(&mut self) -> NickId {
        NickId(self.bump())
    }

    pub fn channel(&mut self) -> ChannelId {
        ChannelId(self.bump())
    }

    pub fn privilege(&mut self) -> PrivilegeId {
        PrivilegeId(self.bump())
    }
}
