//! Tracked nick records.

use std::collections::HashMap;

use crate::ids::{ChannelId, NickId, PrivilegeId};
use crate::modes::NickModes;

/// A tracked user.
///
/// The nickname and the membership map are only changed through the
/// [`Tracker`](super::Tracker), which keeps its indices in step.
#[derive(Debug, Clone)]
pub struct Nick {
    id: NickId,
    nick: String,
    pub ident: String,
    pub host: String,
    pub realname: String,
    pub modes: NickModes,
    pub(super) channels: HashMap<ChannelId, PrivilegeId>,
}

impl Nick {
    pub(super) fn new(id: NickId, nick: &str, ident: &str, realname: &str, host: &str) -> Self {
        Self {
            id,
            nick: nick.to_owned(),
            ident: ident.to_owned(),
            host: host.to_owned(),
            realname: realname.to_owned(),
            modes: NickModes::default(),
            channels: HashMap::new(),
        }
    }

    pub fn id(&self) -> NickId {
        self.id
    }

    /// Current nickname.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub(super) fn set_nick(&mut self, nick: &str) {
        self.nick = nick.to_owned();
    }

    /// `nick!ident@host`
    pub fn hostmask(&self) -> String {
        format!("{}!{}@{}", self.nick, self.ident, self.host)
    }

    /// Channels this nick is on, each with the shared privilege handle.
    pub fn channels(&self) -> impl Iterator<Item = (ChannelId, PrivilegeId)> + '_ {
        self.channels.iter().map(|(&c, &p)| (c, p))
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_on(&self, channel: ChannelId) -> bool {
        self.channels.contains_key(&channel)
    }

    /// Privilege handle for one channel, if a member.
    pub fn privilege_on(&self, channel: ChannelId) -> Option<PrivilegeId> {
        self.channels.get(&channel).copied()
    }
}
