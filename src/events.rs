//! Protocol events and how they drive the tracker.
//!
//! An [`Event`] is the decoded meaning of one inbound line. The line parser
//! lives elsewhere; this module only maps meanings onto entity-store and
//! association operations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Anomaly, TrackResult};
use crate::ids::{ChannelId, NickId, PrivilegeId};
use crate::modes::{
    ChannelChange, ModeSet, parse_channel_changes, parse_nick_changes, split_prefixed,
};
use crate::state::Tracker;

/// A state-changing protocol event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// `:nick!ident@host JOIN #channel`
    Join {
        nick: String,
        #[serde(default)]
        ident: String,
        #[serde(default)]
        host: String,
        channel: String,
    },
    /// `:nick PART #channel :reason`
    Part {
        nick: String,
        channel: String,
        #[serde(default)]
        reason: Option<String>,
    },
    /// `:by KICK #channel nick :reason`
    Kick {
        channel: String,
        nick: String,
        #[serde(default)]
        by: Option<String>,
        #[serde(default)]
        reason: Option<String>,
    },
    /// `:nick QUIT :reason`
    Quit {
        nick: String,
        #[serde(default)]
        reason: Option<String>,
    },
    /// `:old NICK new`
    NickChange { old: String, new: String },
    /// `MODE #channel +ov-k alice bob key`
    ChannelMode {
        channel: String,
        modes: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// `MODE nick +iw`
    UserMode { nick: String, modes: String },
    /// `TOPIC` or RPL_TOPIC.
    Topic { channel: String, topic: String },
    /// RPL_NAMREPLY entries, privilege symbols included.
    Names { channel: String, names: Vec<String> },
    /// RPL_WHOISUSER.
    WhoisUser {
        nick: String,
        ident: String,
        host: String,
        realname: String,
    },
    /// A source prefix seen on any line.
    Hostmask {
        nick: String,
        ident: String,
        host: String,
    },
}

impl Event {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Part { .. } => "part",
            Self::Kick { .. } => "kick",
            Self::Quit { .. } => "quit",
            Self::NickChange { .. } => "nick_change",
            Self::ChannelMode { .. } => "channel_mode",
            Self::UserMode { .. } => "user_mode",
            Self::Topic { .. } => "topic",
            Self::Names { .. } => "names",
            Self::WhoisUser { .. } => "whois_user",
            Self::Hostmask { .. } => "hostmask",
        }
    }
}

impl Tracker {
    /// Apply one event. Anomalies have already been reported when this
    /// returns `Err`; the graph is valid either way.
    pub fn apply(&mut self, event: &Event) -> TrackResult {
        debug!(kind = event.kind(), "applying event");
        match event {
            Event::Join {
                nick,
                ident,
                host,
                channel,
            } => self.on_join(nick, ident, host, channel),
            Event::Part { nick, channel, .. } | Event::Kick { nick, channel, .. } => {
                let chan = self.resolve_channel(channel)?;
                let id = self.resolve_nick(nick)?;
                self.leave_channel(chan, id)
            }
            Event::Quit { nick, .. } => {
                let id = self.resolve_nick(nick)?;
                if self.is_me(id) {
                    return Ok(());
                }
                self.delete_nick(id)
            }
            Event::NickChange { old, new } => {
                let id = self.resolve_nick(old)?;
                self.rename_nick(id, new)
            }
            Event::ChannelMode {
                channel,
                modes,
                args,
            } => self.on_channel_mode(channel, modes, args),
            Event::UserMode { nick, modes } => {
                let id = self.resolve_nick(nick)?;
                if let Some(record) = self.nick_mut(id) {
                    for change in parse_nick_changes(modes) {
                        record.modes.set(change.flag, change.on);
                    }
                }
                Ok(())
            }
            Event::Topic { channel, topic } => {
                let chan = self.resolve_channel(channel)?;
                if let Some(record) = self.channel_mut(chan) {
                    record.topic.clone_from(topic);
                }
                Ok(())
            }
            Event::Names { channel, names } => self.on_names(channel, names),
            Event::WhoisUser {
                nick,
                ident,
                host,
                realname,
            } => {
                let id = self.resolve_nick(nick)?;
                if let Some(record) = self.nick_mut(id) {
                    record.ident.clone_from(ident);
                    record.host.clone_from(host);
                    record.realname.clone_from(realname);
                }
                Ok(())
            }
            Event::Hostmask { nick, ident, host } => {
                let id = self.resolve_nick(nick)?;
                self.refresh_hostmask(id, ident, host);
                Ok(())
            }
        }
    }

    fn resolve_nick(&self, name: &str) -> TrackResult<NickId> {
        self.find_nick(name)
            .ok_or_else(|| self.anomaly(Anomaly::NoSuchNick(name.to_string())))
    }

    fn resolve_channel(&self, name: &str) -> TrackResult<ChannelId> {
        self.find_channel(name)
            .ok_or_else(|| self.anomaly(Anomaly::NoSuchChannel(name.to_string())))
    }

    fn refresh_hostmask(&mut self, id: NickId, ident: &str, host: &str) {
        if let Some(record) = self.nick_mut(id) {
            if !ident.is_empty() {
                record.ident = ident.to_string();
            }
            if !host.is_empty() {
                record.host = host.to_string();
            }
        }
    }

    fn on_join(&mut self, nick: &str, ident: &str, host: &str, channel: &str) -> TrackResult {
        let joiner = self.find_nick(nick);
        let is_me = joiner.is_some_and(|id| self.is_me(id));

        let chan = match self.find_channel(channel) {
            Some(chan) => chan,
            None if is_me => self.create_channel(channel),
            None => return Err(self.anomaly(Anomaly::NoSuchChannel(channel.to_string()))),
        };
        let id = match joiner {
            Some(id) => {
                self.refresh_hostmask(id, ident, host);
                id
            }
            None => self.create_nick(nick, ident, "", host),
        };
        self.join_channel(chan, id).map(|_| ())
    }

    fn on_channel_mode(&mut self, channel: &str, modes: &str, args: &[String]) -> TrackResult {
        let chan = self.resolve_channel(channel)?;
        let changes = parse_channel_changes(modes, args).map_err(|e| self.anomaly(e))?;

        let mut first_err = None;
        for change in changes {
            match change {
                ChannelChange::Flag { flag, on } => {
                    if let Some(record) = self.channel_mut(chan) {
                        record.modes.set(flag, on);
                    }
                }
                ChannelChange::Key(key) => {
                    if let Some(record) = self.channel_mut(chan) {
                        record.modes.set_key(key.unwrap_or_default());
                    }
                }
                ChannelChange::Limit(limit) => {
                    if let Some(record) = self.channel_mut(chan) {
                        record.modes.set_limit(limit.unwrap_or_default());
                    }
                }
                ChannelChange::Privilege { flag, on, nick } => {
                    let target = self
                        .resolve_nick(&nick)
                        .and_then(|id| self.member_privilege(id, chan, &nick, channel));
                    match target {
                        Ok(p) => {
                            if let Some(privs) = self.privileges_mut(p) {
                                privs.set(flag, on);
                            }
                        }
                        Err(e) => {
                            first_err.get_or_insert(e);
                        }
                    }
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn member_privilege(
        &self,
        id: NickId,
        chan: ChannelId,
        nick: &str,
        channel: &str,
    ) -> TrackResult<PrivilegeId> {
        self.membership(id, chan).ok_or_else(|| {
            self.anomaly(Anomaly::NotOnChannel {
                nick: nick.to_string(),
                channel: channel.to_string(),
            })
        })
    }

    fn on_names(&mut self, channel: &str, names: &[String]) -> TrackResult {
        let chan = self.resolve_channel(channel)?;
        for entry in names {
            let (privs, name) = split_prefixed(entry);
            if name.is_empty() {
                continue;
            }
            let id = match self.find_nick(name) {
                Some(id) => id,
                None => self.create_nick(name, "", "", ""),
            };
            let p = match self.membership(id, chan) {
                Some(p) => p,
                None => self.join_channel(chan, id)?,
            };
            if let Some(record) = self.privileges_mut(p) {
                *record = privs;
            }
        }
        Ok(())
    }
}
