//! Human-readable dumps of tracked state.
//!
//! Membership lines are sorted by name so output is stable regardless of
//! map iteration order.

use std::fmt;

use crate::ids::{ChannelId, NickId};
use crate::modes::ModeSet;

use super::{Channel, Nick, Tracker};

/// Borrowed view rendering one nick.
pub struct NickDump<'a> {
    tracker: &'a Tracker,
    nick: &'a Nick,
}

/// Borrowed view rendering one channel.
pub struct ChannelDump<'a> {
    tracker: &'a Tracker,
    channel: &'a Channel,
}

impl fmt::Display for NickDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.nick;
        writeln!(f, "Nick: {}", n.nick())?;
        writeln!(f, "\tHostmask: {}@{}", n.ident, n.host)?;
        writeln!(f, "\tReal Name: {}", n.realname)?;
        writeln!(f, "\tModes: {}", n.modes.to_mode_string())?;
        writeln!(f, "\tChannels: ")?;

        let mut lines: Vec<(&str, String)> = self
            .tracker
            .channels_of(n.id())
            .map(|(c, _, p)| (c.name(), p.to_mode_string()))
            .collect();
        lines.sort_unstable();
        for (name, privs) in lines {
            writeln!(f, "\t\t{name}: {privs}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ChannelDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.channel;
        writeln!(f, "Channel: {}", c.name())?;
        writeln!(f, "\tTopic: {}", c.topic)?;
        writeln!(f, "\tModes: {}", c.modes.to_mode_string())?;
        writeln!(f, "\tNicks: ")?;

        let mut lines: Vec<(&str, String)> = self
            .tracker
            .members_of(c.id())
            .map(|(n, _, p)| (n.nick(), p.to_mode_string()))
            .collect();
        lines.sort_unstable();
        for (name, privs) in lines {
            writeln!(f, "\t\t{name}: {privs}")?;
        }
        Ok(())
    }
}

impl Tracker {
    pub fn describe_nick(&self, id: NickId) -> Option<NickDump<'_>> {
        Some(NickDump {
            tracker: self,
            nick: self.nicks.get(&id)?,
        })
    }

    pub fn describe_channel(&self, id: ChannelId) -> Option<ChannelDump<'_>> {
        Some(ChannelDump {
            tracker: self,
            channel: self.channels.get(&id)?,
        })
    }

    /// Every channel, then every nick, each group sorted by name.
    pub fn dump(&self) -> String {
        let mut channels: Vec<&Channel> = self.channels.values().collect();
        channels.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        let mut nicks: Vec<&Nick> = self.nicks.values().collect();
        nicks.sort_unstable_by(|a, b| a.nick().cmp(b.nick()));

        let mut out = String::new();
        for channel in channels {
            out.push_str(&ChannelDump { tracker: self, channel }.to_string());
        }
        for nick in nicks {
            out.push_str(&NickDump { tracker: self, nick }.to_string());
        }
        out
    }
}
