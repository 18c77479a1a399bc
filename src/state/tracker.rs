//! The entity store.
//!
//! The [`Tracker`] is the sole owner of every [`Nick`], [`Channel`] and
//! privilege record. Records live in arenas keyed by handle; the two name
//! indices map folded names to handles.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::casemap::Casemapping;
use crate::config::Config;
use crate::error::Anomaly;
use crate::ids::{ChannelId, IdGenerator, NickId, PrivilegeId};
use crate::modes::ChannelPrivileges;
use crate::observer::{AnomalySink, TracingSink};

use super::{Channel, Nick};

/// In-memory mirror of the nicks and channels visible to one connection.
pub struct Tracker {
    pub(super) casemapping: Casemapping,
    pub(super) me: NickId,
    pub(super) ids: IdGenerator,
    pub(super) nicks: HashMap<NickId, Nick>,
    pub(super) channels: HashMap<ChannelId, Channel>,
    pub(super) privileges: HashMap<PrivilegeId, ChannelPrivileges>,
    pub(super) nick_index: HashMap<String, NickId>,
    pub(super) channel_index: HashMap<String, ChannelId>,
    sink: Box<dyn AnomalySink>,
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("casemapping", &self.casemapping)
            .field("me", &self.me)
            .field("nicks", &self.nicks.len())
            .field("channels", &self.channels.len())
            .field("privileges", &self.privileges.len())
            .finish()
    }
}

impl Tracker {
    /// Create a tracker that logs anomalies through `tracing`.
    pub fn new(config: &Config) -> Self {
        Self::with_sink(config, TracingSink)
    }

    /// Create a tracker reporting anomalies to `sink`.
    pub fn with_sink(config: &Config, sink: impl AnomalySink + 'static) -> Self {
        let mut ids = IdGenerator::new();
        let me = ids.nick();
        let identity = &config.identity;
        let casemapping = config.tracking.casemapping;

        let mut nicks = HashMap::new();
        nicks.insert(
            me,
            Nick::new(
                me,
                &identity.nick,
                &identity.ident,
                &identity.realname,
                &identity.host,
            ),
        );
        let mut nick_index = HashMap::new();
        nick_index.insert(casemapping.fold(&identity.nick), me);

        Self {
            casemapping,
            me,
            ids,
            nicks,
            channels: HashMap::new(),
            privileges: HashMap::new(),
            nick_index,
            channel_index: HashMap::new(),
            sink: Box::new(sink),
        }
    }

    /// Report an anomaly to the sink and hand it back.
    pub(crate) fn anomaly(&self, anomaly: Anomaly) -> Anomaly {
        self.sink.report(&anomaly);
        anomaly
    }

    pub fn casemapping(&self) -> Casemapping {
        self.casemapping
    }

    /// Handle of the local identity.
    pub fn me(&self) -> NickId {
        self.me
    }

    pub fn is_me(&self, nick: NickId) -> bool {
        nick == self.me
    }

    // === Nicks ===

    /// Start tracking a nick with empty modes and no memberships.
    ///
    /// A non-local nick already indexed under the same name is torn down
    /// first. The local identity is never displaced: asking for its name
    /// reports a collision and returns its handle.
    pub fn create_nick(&mut self, nick: &str, ident: &str, name: &str, host: &str) -> NickId {
        let key = self.casemapping.fold(nick);
        if let Some(&existing) = self.nick_index.get(&key) {
            if existing == self.me {
                self.anomaly(Anomaly::NickCollision(nick.to_string()));
                return self.me;
            }
            debug!(nick = %nick, "replacing tracked nick");
            self.drop_nick(existing);
        }

        let id = self.ids.nick();
        self.nicks.insert(id, Nick::new(id, nick, ident, name, host));
        self.nick_index.insert(key, id);
        debug!(nick = %nick, id = %id, "tracking nick");
        id
    }

    /// Look up a nick by name.
    pub fn find_nick(&self, name: &str) -> Option<NickId> {
        self.nick_index.get(&self.casemapping.fold(name)).copied()
    }

    /// Look up a nick by name and borrow its record.
    pub fn nick_by_name(&self, name: &str) -> Option<&Nick> {
        self.find_nick(name).and_then(|id| self.nicks.get(&id))
    }

    pub fn nick(&self, id: NickId) -> Option<&Nick> {
        self.nicks.get(&id)
    }

    pub fn nick_mut(&mut self, id: NickId) -> Option<&mut Nick> {
        self.nicks.get_mut(&id)
    }

    pub fn nicks(&self) -> impl Iterator<Item = &Nick> + '_ {
        self.nicks.values()
    }

    pub fn nick_count(&self) -> usize {
        self.nicks.len()
    }

    // === Channels ===

    /// Start tracking a channel with empty modes and no members.
    ///
    /// A channel already indexed under the same name is torn down first.
    pub fn create_channel(&mut self, name: &str) -> ChannelId {
        let key = self.casemapping.fold(name);
        if let Some(&existing) = self.channel_index.get(&key) {
            debug!(channel = %name, "replacing tracked channel");
            self.drop_channel(existing);
        }

        let id = self.ids.channel();
        self.channels.insert(id, Channel::new(id, name));
        self.channel_index.insert(key, id);
        debug!(channel = %name, id = %id, "tracking channel");
        id
    }

    /// Look up a channel by name.
    pub fn find_channel(&self, name: &str) -> Option<ChannelId> {
        self.channel_index.get(&self.casemapping.fold(name)).copied()
    }

    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.find_channel(name).and_then(|id| self.channels.get(&id))
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(&id)
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.channels.values()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    // === Memberships ===

    /// The privilege record shared by one membership.
    pub fn privileges(&self, id: PrivilegeId) -> Option<&ChannelPrivileges> {
        self.privileges.get(&id)
    }

    pub fn privileges_mut(&mut self, id: PrivilegeId) -> Option<&mut ChannelPrivileges> {
        self.privileges.get_mut(&id)
    }

    /// Handle of the membership between `nick` and `channel`, if any.
    pub fn membership(&self, nick: NickId, channel: ChannelId) -> Option<PrivilegeId> {
        self.channels.get(&channel)?.privilege_of(nick)
    }

    /// Members of a channel with their privileges.
    pub fn members_of(
        &self,
        channel: ChannelId,
    ) -> impl Iterator<Item = (&Nick, PrivilegeId, &ChannelPrivileges)> + '_ {
        self.channels
            .get(&channel)
            .into_iter()
            .flat_map(move |c| {
                c.members.iter().filter_map(move |(n, p)| {
                    Some((self.nicks.get(n)?, *p, self.privileges.get(p)?))
                })
            })
    }

    /// Channels a nick is on with its privileges there.
    pub fn channels_of(
        &self,
        nick: NickId,
    ) -> impl Iterator<Item = (&Channel, PrivilegeId, &ChannelPrivileges)> + '_ {
        self.nicks.get(&nick).into_iter().flat_map(move |n| {
            n.channels.iter().filter_map(move |(c, p)| {
                Some((self.channels.get(c)?, *p, self.privileges.get(p)?))
            })
        })
    }

    /// Walk the whole graph and describe the first broken invariant found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut memberships = 0;

        for (&cid, channel) in &self.channels {
            if channel.members.is_empty() {
                return Err(format!("channel {} has no members", channel.name()));
            }
            if self.channel_index.get(&self.casemapping.fold(channel.name())) != Some(&cid) {
                return Err(format!("channel {} is not indexed", channel.name()));
            }
            for (nid, pid) in &channel.members {
                let Some(nick) = self.nicks.get(nid) else {
                    return Err(format!("channel {} lists untracked {}", channel.name(), nid));
                };
                if nick.channels.get(&cid) != Some(pid) {
                    return Err(format!(
                        "{} on {} is not mirrored on the nick side",
                        nick.nick(),
                        channel.name()
                    ));
                }
                if !self.privileges.contains_key(pid) {
                    return Err(format!("{} has no privilege record", pid));
                }
                memberships += 1;
            }
        }

        for (&nid, nick) in &self.nicks {
            if self.nick_index.get(&self.casemapping.fold(nick.nick())) != Some(&nid) {
                return Err(format!("nick {} is not indexed", nick.nick()));
            }
            if nid != self.me && nick.channels.is_empty() {
                return Err(format!("nick {} is on no channels", nick.nick()));
            }
            for (cid, pid) in &nick.channels {
                let mirrored = self.channels.get(cid).and_then(|c| c.members.get(&nid));
                if mirrored != Some(pid) {
                    return Err(format!(
                        "{} on {} is not mirrored on the channel side",
                        nick.nick(),
                        cid
                    ));
                }
            }
        }

        if self.nick_index.len() != self.nicks.len() {
            return Err("nick index has stale entries".to_string());
        }
        if self.channel_index.len() != self.channels.len() {
            return Err("channel index has stale entries".to_string());
        }
        if self.privileges.len() != memberships {
            return Err(format!(
                "{} privilege records for {} memberships",
                self.privileges.len(),
                memberships
            ));
        }
        Ok(())
    }
}
