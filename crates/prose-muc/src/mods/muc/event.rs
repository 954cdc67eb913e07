// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::{BareJid, Jid};

use crate::mods::muc::OccupantPresence;
use crate::stanza::Message;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A groupchat message carried a subject. `topic` is empty when the subject was cleared.
    TopicChanged {
        room: BareJid,
        from: Jid,
        topic: String,
    },
    InviteReceived(Invitation),
    DeclineReceived {
        room: BareJid,
        from: Jid,
        reason: Option<String>,
    },
    /// Any other message carrying a muc#user payload.
    OtherMessage(Message),
    /// The room rejected our join request.
    JoinFailed(OccupantPresence),
    Error(OccupantPresence),
    OccupantAvailable(OccupantPresence),
    OccupantUnavailable(OccupantPresence),
    RoomDestroyed {
        room: BareJid,
        new_room: Option<BareJid>,
        password: Option<String>,
        reason: Option<String>,
    },
    /// We left the room or were removed from it.
    SelfLeft(OccupantPresence),
    /// The room confirmed our join request.
    SelfJoined(OccupantPresence),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationKind {
    /// XEP-0249: sent directly from user to user.
    Direct,
    /// XEP-0045: sent through the room.
    Mediated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub kind: InvitationKind,
    pub room: BareJid,
    /// The inviting user.
    pub from: Jid,
    pub password: Option<String>,
    pub reason: Option<String>,
    pub thread: Option<String>,
}
