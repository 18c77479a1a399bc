//! The association manager.
//!
//! Every nick/channel pair is either absent or a member. Membership is
//! stored on both sides and both sides hold the same [`PrivilegeId`].
//! The public entry points come in mirrored pairs (channel-initiated and
//! nick-initiated); each pair funnels into one routine, so there is a
//! single place where the two maps are written.

use tracing::debug;

use crate::error::{Anomaly, TrackResult};
use crate::ids::{ChannelId, NickId, PrivilegeId};
use crate::modes::ChannelPrivileges;

use super::Tracker;

impl Tracker {
    // === Public entry points ===

    /// Add `nick` to `channel`. Reports a duplicate instead of touching an
    /// existing membership.
    pub fn join_channel(&mut self, channel: ChannelId, nick: NickId) -> TrackResult<PrivilegeId> {
        self.associate(nick, channel)
    }

    /// Mirror of [`join_channel`](Self::join_channel).
    pub fn join_nick(&mut self, nick: NickId, channel: ChannelId) -> TrackResult<PrivilegeId> {
        self.associate(nick, channel)
    }

    /// Remove `nick` from `channel`, running the departure cascades.
    pub fn leave_channel(&mut self, channel: ChannelId, nick: NickId) -> TrackResult {
        self.dissociate(nick, channel)
    }

    /// Mirror of [`leave_channel`](Self::leave_channel).
    pub fn leave_nick(&mut self, nick: NickId, channel: ChannelId) -> TrackResult {
        self.dissociate(nick, channel)
    }

    /// Re-key a nick under `new_name`. Memberships are untouched.
    ///
    /// A different non-local nick already holding the new name is torn
    /// down. Renaming onto the local identity's name is refused.
    pub fn rename_nick(&mut self, nick: NickId, new_name: &str) -> TrackResult {
        let Some(record) = self.nicks.get(&nick) else {
            return Err(self.anomaly(Anomaly::NoSuchNick(nick.to_string())));
        };
        let old_name = record.nick().to_string();
        let old_key = self.casemapping.fold(&old_name);
        let new_key = self.casemapping.fold(new_name);

        if old_key != new_key {
            if let Some(&holder) = self.nick_index.get(&new_key) {
                if holder == self.me {
                    return Err(self.anomaly(Anomaly::NickCollision(new_name.to_string())));
                }
                debug!(nick = %new_name, "rename displaces tracked nick");
                self.drop_nick(holder);
            }
            if self.nick_index.get(&old_key) == Some(&nick) {
                self.nick_index.remove(&old_key);
            }
            self.nick_index.insert(new_key, nick);
        }

        if let Some(record) = self.nicks.get_mut(&nick) {
            record.set_nick(new_name);
        }
        debug!(old = %old_name, new = %new_name, "renamed nick");
        Ok(())
    }

    /// Stop tracking a channel, disassociating every member. Members left
    /// on no channel are dropped too, except the local identity.
    pub fn delete_channel(&mut self, channel: ChannelId) -> TrackResult {
        if !self.channels.contains_key(&channel) {
            return Err(self.anomaly(Anomaly::NoSuchChannel(channel.to_string())));
        }
        self.drop_channel(channel);
        Ok(())
    }

    /// Stop tracking a non-local nick, disassociating it from every channel.
    pub fn delete_nick(&mut self, nick: NickId) -> TrackResult {
        if nick == self.me {
            let name = self.nicks.get(&nick).map(|n| n.nick().to_string());
            return Err(self.anomaly(Anomaly::LocalIdentityExempt(name.unwrap_or_default())));
        }
        if !self.nicks.contains_key(&nick) {
            return Err(self.anomaly(Anomaly::NoSuchNick(nick.to_string())));
        }
        self.drop_nick(nick);
        Ok(())
    }

    // === Shared mutation routines ===

    /// Resolve both names, reporting the first missing record.
    fn names_of(&self, nick: NickId, channel: ChannelId) -> TrackResult<(String, String)> {
        let Some(n) = self.nicks.get(&nick) else {
            return Err(self.anomaly(Anomaly::NoSuchNick(nick.to_string())));
        };
        let Some(c) = self.channels.get(&channel) else {
            return Err(self.anomaly(Anomaly::NoSuchChannel(channel.to_string())));
        };
        Ok((n.nick().to_string(), c.name().to_string()))
    }

    /// Mirrored membership lookup. Divergence is a bug, not bad input.
    fn mirrored(&self, nick: NickId, channel: ChannelId) -> Option<PrivilegeId> {
        let on_channel = self.channels.get(&channel).and_then(|c| c.privilege_of(nick));
        let on_nick = self.nicks.get(&nick).and_then(|n| n.privilege_on(channel));
        assert_eq!(
            on_channel, on_nick,
            "membership maps diverged for {nick} on {channel}"
        );
        on_channel
    }

    fn associate(&mut self, nick: NickId, channel: ChannelId) -> TrackResult<PrivilegeId> {
        let (nick_name, channel_name) = self.names_of(nick, channel)?;
        if self.mirrored(nick, channel).is_some() {
            return Err(self.anomaly(Anomaly::DuplicateAssociation {
                nick: nick_name,
                channel: channel_name,
            }));
        }

        let privilege = self.ids.privilege();
        self.privileges
            .insert(privilege, ChannelPrivileges::default());
        if let Some(c) = self.channels.get_mut(&channel) {
            c.members.insert(nick, privilege);
        }
        if let Some(n) = self.nicks.get_mut(&nick) {
            n.channels.insert(channel, privilege);
        }
        debug!(nick = %nick_name, channel = %channel_name, "joined");
        Ok(privilege)
    }

    fn dissociate(&mut self, nick: NickId, channel: ChannelId) -> TrackResult {
        let (nick_name, channel_name) = self.names_of(nick, channel)?;
        if self.mirrored(nick, channel).is_none() {
            return Err(self.anomaly(Anomaly::RedundantRemoval {
                nick: nick_name,
                channel: channel_name,
            }));
        }

        if nick == self.me {
            // We left: nothing we know about the channel stays valid.
            debug!(channel = %channel_name, "left channel, dropping its state");
            self.drop_channel(channel);
            return Ok(());
        }

        self.unlink(nick, channel);
        debug!(nick = %nick_name, channel = %channel_name, "parted");
        if self.nicks.get(&nick).is_some_and(|n| n.channels.is_empty()) {
            debug!(nick = %nick_name, "no shared channels left, dropping nick");
            self.remove_nick_record(nick);
        }
        if self.channels.get(&channel).is_some_and(|c| c.members.is_empty()) {
            self.remove_channel_record(channel);
        }
        Ok(())
    }

    /// Remove both mirrored entries and their privilege record.
    ///
    /// Idempotent: an absent pair is left alone.
    fn unlink(&mut self, nick: NickId, channel: ChannelId) -> Option<PrivilegeId> {
        let from_channel = self
            .channels
            .get_mut(&channel)
            .and_then(|c| c.members.remove(&nick));
        let from_nick = self
            .nicks
            .get_mut(&nick)
            .and_then(|n| n.channels.remove(&channel));
        assert_eq!(
            from_channel, from_nick,
            "membership maps diverged for {nick} on {channel}"
        );
        if let Some(privilege) = from_channel {
            self.privileges.remove(&privilege);
        }
        from_channel
    }

    /// Tear down a channel and every membership it has.
    pub(super) fn drop_channel(&mut self, channel: ChannelId) {
        let members: Vec<NickId> = match self.channels.get(&channel) {
            Some(c) => c.members.keys().copied().collect(),
            None => return,
        };
        for member in members {
            self.unlink(member, channel);
            if member != self.me && self.nicks.get(&member).is_some_and(|n| n.channels.is_empty())
            {
                self.remove_nick_record(member);
            }
        }
        self.remove_channel_record(channel);
    }

    /// Tear down a non-local nick and every membership it has.
    pub(super) fn drop_nick(&mut self, nick: NickId) {
        debug_assert_ne!(nick, self.me, "the local identity is never dropped");
        let channels: Vec<ChannelId> = match self.nicks.get(&nick) {
            Some(n) => n.channels.keys().copied().collect(),
            None => return,
        };
        for channel in channels {
            self.unlink(nick, channel);
            if self.channels.get(&channel).is_some_and(|c| c.members.is_empty()) {
                self.remove_channel_record(channel);
            }
        }
        self.remove_nick_record(nick);
    }

    fn remove_nick_record(&mut self, nick: NickId) {
        if let Some(record) = self.nicks.remove(&nick) {
            let key = self.casemapping.fold(record.nick());
            if self.nick_index.get(&key) == Some(&nick) {
                self.nick_index.remove(&key);
            }
            debug!(nick = %record.nick(), "stopped tracking nick");
        }
    }

    fn remove_channel_record(&mut self, channel: ChannelId) {
        if let Some(record) = self.channels.remove(&channel) {
            let key = self.casemapping.fold(record.name());
            if self.channel_index.get(&key) == Some(&channel) {
                self.channel_index.remove(&key);
            }
            debug!(channel = %record.name(), "stopped tracking channel");
        }
    }
}
