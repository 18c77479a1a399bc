//! Channel modes.

use std::fmt;

use super::table::{ModeSet, ModeTable};

/// Channel mode flags tracked by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelFlag {
    /// 'p' - Private
    Private,
    /// 's' - Secret (hidden from LIST, WHO)
    Secret,
    /// 't' - Only ops can change topic
    ProtectedTopic,
    /// 'n' - No external messages
    NoExternalMsg,
    /// 'm' - Moderated (only voiced+ can speak)
    Moderated,
    /// 'i' - Invite only
    InviteOnly,
    /// 'O' - Oper-only channel
    OperOnly,
    /// 'z' - TLS/SSL only channel
    SslOnly,
    /// 'k' - Channel key (string value)
    Key,
    /// 'l' - User limit (integer value)
    Limit,
}

impl ChannelFlag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::Secret => "Secret",
            Self::ProtectedTopic => "ProtectedTopic",
            Self::NoExternalMsg => "NoExternalMsg",
            Self::Moderated => "Moderated",
            Self::InviteOnly => "InviteOnly",
            Self::OperOnly => "OperOnly",
            Self::SslOnly => "SSLOnly",
            Self::Key => "Key",
            Self::Limit => "Limit",
        }
    }
}

impl fmt::Display for ChannelFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel mode letters, in serialization order.
pub static CHANNEL_MODES: ModeTable<ChannelFlag> = ModeTable::new(&[
    (ChannelFlag::Private, 'p'),
    (ChannelFlag::Secret, 's'),
    (ChannelFlag::ProtectedTopic, 't'),
    (ChannelFlag::NoExternalMsg, 'n'),
    (ChannelFlag::Moderated, 'm'),
    (ChannelFlag::InviteOnly, 'i'),
    (ChannelFlag::OperOnly, 'O'),
    (ChannelFlag::SslOnly, 'z'),
    (ChannelFlag::Key, 'k'),
    (ChannelFlag::Limit, 'l'),
]);

/// The modes of a channel (the ones we care about, at least).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChannelModes {
    pub private: bool,          // +p
    pub secret: bool,           // +s
    pub protected_topic: bool,  // +t
    pub no_external_msg: bool,  // +n
    pub moderated: bool,        // +m
    pub invite_only: bool,      // +i
    pub oper_only: bool,        // +O
    pub ssl_only: bool,         // +z
    /// +k, empty when unset.
    pub key: String,
    /// +l, zero when unset.
    pub limit: u32,
}

impl ChannelModes {
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }
}

impl ModeSet for ChannelModes {
    type Flag = ChannelFlag;

    fn table() -> &'static ModeTable<ChannelFlag> {
        &CHANNEL_MODES
    }

    fn is_set(&self, flag: ChannelFlag) -> bool {
        match flag {
            ChannelFlag::Private => self.private,
            ChannelFlag::Secret => self.secret,
            ChannelFlag::ProtectedTopic => self.protected_topic,
            ChannelFlag::NoExternalMsg => self.no_external_msg,
            ChannelFlag::Moderated => self.moderated,
            ChannelFlag::InviteOnly => self.invite_only,
            ChannelFlag::OperOnly => self.oper_only,
            ChannelFlag::SslOnly => self.ssl_only,
            ChannelFlag::Key => !self.key.is_empty(),
            ChannelFlag::Limit => self.limit != 0,
        }
    }

    fn set(&mut self, flag: ChannelFlag, on: bool) {
        match flag {
            ChannelFlag::Private => self.private = on,
            ChannelFlag::Secret => self.secret = on,
            ChannelFlag::ProtectedTopic => self.protected_topic = on,
            ChannelFlag::NoExternalMsg => self.no_external_msg = on,
            ChannelFlag::Moderated => self.moderated = on,
            ChannelFlag::InviteOnly => self.invite_only = on,
            ChannelFlag::OperOnly => self.oper_only = on,
            ChannelFlag::SslOnly => self.ssl_only = on,
            // Setting a value flag needs the value; see set_key / set_limit.
            ChannelFlag::Key if !on => self.key.clear(),
            ChannelFlag::Limit if !on => self.limit = 0,
            ChannelFlag::Key | ChannelFlag::Limit => {}
        }
    }

    /// Key comes first, then limit, whatever order the letters are in.
    fn arguments(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(2);
        if !self.key.is_empty() {
            args.push(self.key.clone());
        }
        if self.limit != 0 {
            args.push(self.limit.to_string());
        }
        args
    }
}

impl fmt::Display for ChannelModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mode_string())
    }
}
