// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::{BareJid, Jid};
use tracing::warn;
use xmpp_parsers::presence::{Presence, Type as PresenceType};

use crate::ns;
use crate::stanza::muc::{Destroy, MucUser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceKind {
    Available,
    Unavailable,
    Error,
}

/// A presence received from a room or one of its occupants.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupantPresence {
    pub room: BareJid,
    pub from: Jid,
    pub kind: PresenceKind,
    /// The parsed muc#user payload. Absent for presences that are not MUC presences, which
    /// happens for errors returned in response to a join.
    pub muc_user: Option<MucUser>,
    pub presence: Presence,
}

impl OccupantPresence {
    /// Returns `None` for presences without a sender and for subscription related types which
    /// play no role in MUC.
    pub fn new(presence: &Presence) -> Option<Self> {
        let from = presence.from.clone()?;

        let kind = match presence.type_ {
            PresenceType::None => PresenceKind::Available,
            PresenceType::Unavailable => PresenceKind::Unavailable,
            PresenceType::Error => PresenceKind::Error,
            _ => return None,
        };

        let muc_user = presence
            .payloads
            .iter()
            .find(|p| p.is("x", ns::MUC_USER))
            .and_then(|payload| match MucUser::try_from(payload.clone()) {
                Ok(muc_user) => Some(muc_user),
                Err(err) => {
                    warn!("Ignoring malformed muc#user payload from {}. {}", from, err);
                    None
                }
            });

        Some(OccupantPresence {
            room: from.to_bare(),
            from,
            kind,
            muc_user,
            presence: presence.clone(),
        })
    }

    /// True if the room flagged this presence as referring to ourselves (status code 110).
    pub fn is_self(&self) -> bool {
        self.muc_user
            .as_ref()
            .map(MucUser::is_self_presence)
            .unwrap_or(false)
    }

    pub fn status_codes(&self) -> &[u16] {
        self.muc_user
            .as_ref()
            .map(|muc_user| muc_user.status_codes.as_slice())
            .unwrap_or_default()
    }

    /// The occupant's nickname in the room, i.e. the resource of the sender.
    pub fn nick(&self) -> Option<&str> {
        self.from.resource_str()
    }

    pub fn destroy(&self) -> Option<&Destroy> {
        self.muc_user.as_ref().and_then(|muc_user| muc_user.destroy.as_ref())
    }
}
