// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use indexmap::IndexMap;
use jid::BareJid;

/// Tracks the rooms we're in the process of joining and the rooms we've joined, each with the
/// nickname used. A room is never in both at once.
///
/// Both maps preserve insertion order so that rooms are rejoined in the order they were joined.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoomRegistry {
    pending: IndexMap<BareJid, String>,
    active: IndexMap<BareJid, String>,
}

impl RoomRegistry {
    /// Moves `room` into the joining state. A previous join attempt or membership is replaced.
    pub fn begin_join(&mut self, room: BareJid, nick: impl Into<String>) {
        self.active.shift_remove(&room);
        self.pending.insert(room, nick.into());
    }

    /// Records the membership confirmed by the room under the nickname it assigned.
    pub fn confirm_join(&mut self, room: BareJid, nick: impl Into<String>) {
        self.pending.shift_remove(&room);
        self.active.insert(room, nick.into());
    }

    pub fn fail_join(&mut self, room: &BareJid) -> Option<String> {
        self.pending.shift_remove(room)
    }

    pub fn remove_joined(&mut self, room: &BareJid) -> Option<String> {
        self.active.shift_remove(room)
    }

    pub fn is_joining(&self, room: &BareJid) -> bool {
        self.pending.contains_key(room)
    }

    pub fn is_joined(&self, room: &BareJid) -> bool {
        self.active.contains_key(room)
    }

    pub fn joining_nick(&self, room: &BareJid) -> Option<&str> {
        self.pending.get(room).map(String::as_str)
    }

    pub fn joined_nick(&self, room: &BareJid) -> Option<&str> {
        self.active.get(room).map(String::as_str)
    }

    pub fn joining_rooms(&self) -> Vec<(BareJid, String)> {
        Self::snapshot(&self.pending)
    }

    pub fn joined_rooms(&self) -> Vec<(BareJid, String)> {
        Self::snapshot(&self.active)
    }

    pub fn take_joining_rooms(&mut self) -> Vec<(BareJid, String)> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn take_joined_rooms(&mut self) -> Vec<(BareJid, String)> {
        std::mem::take(&mut self.active).into_iter().collect()
    }
}

impl RoomRegistry {
    fn snapshot(map: &IndexMap<BareJid, String>) -> Vec<(BareJid, String)> {
        map.iter()
            .map(|(room, nick)| (room.clone(), nick.clone()))
            .collect()
    }
}
