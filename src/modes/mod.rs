//! Mode records and their IRC mode-character codec.
//!
//! Three independent domains are tracked: channel modes, nick (user) modes
//! and per-membership channel privileges. Each is backed by an ordered
//! [`ModeTable`] of `(flag, char)` pairs. Table order is the serialization
//! order, so `to_mode_string` output is deterministic.

mod change;
mod channel;
mod nick;
mod privilege;
mod table;

pub use self::change::{
    ChannelChange, UserModeChange, parse_channel_changes, parse_nick_changes,
};
pub use self::channel::{CHANNEL_MODES, ChannelFlag, ChannelModes};
pub use self::nick::{NICK_MODES, NickFlag, NickModes};
pub use self::privilege::{
    ChannelPrivileges, PRIVILEGE_MODES, PRIVILEGE_SYMBOLS, PrivilegeFlag, split_prefixed,
};
pub use self::table::{ModeSet, ModeTable, NO_MODES_SET};
