//! Per-membership channel privileges.

use std::fmt;

use super::table::{ModeSet, ModeTable};

/// Privileges a nick can hold on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivilegeFlag {
    /// 'q' (~)
    Owner,
    /// 'a' (&)
    Admin,
    /// 'o' (@)
    Op,
    /// 'h' (%)
    HalfOp,
    /// 'v' (+)
    Voice,
}

impl PrivilegeFlag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Admin => "Admin",
            Self::Op => "Op",
            Self::HalfOp => "HalfOp",
            Self::Voice => "Voice",
        }
    }
}

impl fmt::Display for PrivilegeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Privilege mode letters, highest first.
pub static PRIVILEGE_MODES: ModeTable<PrivilegeFlag> = ModeTable::new(&[
    (PrivilegeFlag::Owner, 'q'),
    (PrivilegeFlag::Admin, 'a'),
    (PrivilegeFlag::Op, 'o'),
    (PrivilegeFlag::HalfOp, 'h'),
    (PrivilegeFlag::Voice, 'v'),
]);

/// Symbols used for privileges in NAMES and WHOIS replies.
pub static PRIVILEGE_SYMBOLS: ModeTable<PrivilegeFlag> = ModeTable::new(&[
    (PrivilegeFlag::Owner, '~'),
    (PrivilegeFlag::Admin, '&'),
    (PrivilegeFlag::Op, '@'),
    (PrivilegeFlag::HalfOp, '%'),
    (PrivilegeFlag::Voice, '+'),
]);

/// The privilege record of one membership.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPrivileges {
    pub owner: bool,  // +q (~)
    pub admin: bool,  // +a (&)
    pub op: bool,     // +o (@)
    pub halfop: bool, // +h (%)
    pub voice: bool,  // +v (+)
}

impl ChannelPrivileges {
    /// Get the highest prefix character for this member.
    /// Priority: ~ > & > @ > % > +
    pub fn prefix_char(&self) -> Option<char> {
        PRIVILEGE_SYMBOLS
            .entries()
            .iter()
            .find(|&&(flag, _)| self.is_set(flag))
            .map(|&(_, c)| c)
    }

    /// Get all prefix characters for this member (multi-prefix order).
    pub fn all_prefix_chars(&self) -> String {
        PRIVILEGE_SYMBOLS
            .entries()
            .iter()
            .filter(|&&(flag, _)| self.is_set(flag))
            .map(|&(_, c)| c)
            .collect()
    }

    /// Op or higher.
    pub fn has_op_or_higher(&self) -> bool {
        self.owner || self.admin || self.op
    }

    /// Voice or higher (can speak in a moderated channel).
    pub fn has_voice_or_higher(&self) -> bool {
        self.has_op_or_higher() || self.halfop || self.voice
    }
}

/// Split a NAMES entry like `@+alice` into its privileges and the bare nick.
pub fn split_prefixed(entry: &str) -> (ChannelPrivileges, &str) {
    let mut privs = ChannelPrivileges::default();
    let mut rest = entry;
    while let Some(c) = rest.chars().next() {
        match PRIVILEGE_SYMBOLS.flag_of(c) {
            Some(flag) => {
                privs.set(flag, true);
                rest = &rest[c.len_utf8()..];
            }
            None => break,
        }
    }
    (privs, rest)
}

impl ModeSet for ChannelPrivileges {
    type Flag = PrivilegeFlag;

    fn table() -> &'static ModeTable<PrivilegeFlag> {
        &PRIVILEGE_MODES
    }

    fn is_set(&self, flag: PrivilegeFlag) -> bool {
        match flag {
            PrivilegeFlag::Owner => self.owner,
            PrivilegeFlag::Admin => self.admin,
            PrivilegeFlag::Op => self.op,
            PrivilegeFlag::HalfOp => self.halfop,
            PrivilegeFlag::Voice => self.voice,
        }
    }

    fn set(&mut self, flag: PrivilegeFlag, on: bool) {
        match flag {
            PrivilegeFlag::Owner => self.owner = on,
            PrivilegeFlag::Admin => self.admin = on,
            PrivilegeFlag::Op => self.op = on,
            PrivilegeFlag::HalfOp => self.halfop = on,
            PrivilegeFlag::Voice => self.voice = on,
        }
    }
}

impl fmt::Display for ChannelPrivileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mode_string())
    }
}
