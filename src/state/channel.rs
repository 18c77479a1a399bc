//! Tracked channel records.

use std::collections::HashMap;

use crate::ids::{ChannelId, NickId, PrivilegeId};
use crate::modes::ChannelModes;

/// A tracked channel. The name is fixed at creation.
#[derive(Debug, Clone)]
pub struct Channel {
    id: ChannelId,
    name: String,
    pub topic: String,
    pub modes: ChannelModes,
    pub(super) members: HashMap<NickId, PrivilegeId>,
}

impl Channel {
    pub(super) fn new(id: ChannelId, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            topic: String::new(),
            modes: ChannelModes::default(),
            members: HashMap::new(),
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members of this channel, each with the shared privilege handle.
    pub fn members(&self) -> impl Iterator<Item = (NickId, PrivilegeId)> + '_ {
        self.members.iter().map(|(&n, &p)| (n, p))
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn has_member(&self, nick: NickId) -> bool {
        self.members.contains_key(&nick)
    }

    pub fn privilege_of(&self, nick: NickId) -> Option<PrivilegeId> {
        self.members.get(&nick).copied()
    }
}
