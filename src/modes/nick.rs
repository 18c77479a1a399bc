//! Nick (user) modes.
//!
//! Only really useful for the local identity: other users' modes are not
//! visible without operator privileges, and even then only on some servers.

use std::fmt;

use super::table::{ModeSet, ModeTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NickFlag {
    /// 'i' - Invisible
    Invisible,
    /// 'o' - IRC operator
    Oper,
    /// 'w' - Receives WALLOPS
    WallOps,
    /// 'x' - Hostname is masked
    HiddenHost,
    /// 'z' - Connected over TLS
    Ssl,
}

impl NickFlag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Invisible => "Invisible",
            Self::Oper => "Oper",
            Self::WallOps => "WallOps",
            Self::HiddenHost => "HiddenHost",
            Self::Ssl => "SSL",
        }
    }
}

impl fmt::Display for NickFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub static NICK_MODES: ModeTable<NickFlag> = ModeTable::new(&[
    (NickFlag::Invisible, 'i'),
    (NickFlag::Oper, 'o'),
    (NickFlag::WallOps, 'w'),
    (NickFlag::HiddenHost, 'x'),
    (NickFlag::Ssl, 'z'),
]);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NickModes {
    pub invisible: bool,   // +i
    pub oper: bool,        // +o
    pub wallops: bool,     // +w
    pub hidden_host: bool, // +x
    pub ssl: bool,         // +z
}

impl ModeSet for NickModes {
    type Flag = NickFlag;

    fn table() -> &'static ModeTable<NickFlag> {
        &NICK_MODES
    }

    fn is_set(&self, flag: NickFlag) -> bool {
        match flag {
            NickFlag::Invisible => self.invisible,
            NickFlag::Oper => self.oper,
            NickFlag::WallOps => self.wallops,
            NickFlag::HiddenHost => self.hidden_host,
            NickFlag::Ssl => self.ssl,
        }
    }

    fn set(&mut self, flag: NickFlag, on: bool) {
        match flag {
            NickFlag::Invisible => self.invisible = on,
            NickFlag::Oper => self.oper = on,
            NickFlag::WallOps => self.wallops = on,
            NickFlag::HiddenHost => self.hidden_host = on,
            NickFlag::Ssl => self.ssl = on,
        }
    }
}

impl fmt::Display for NickModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mode_string())
    }
}
