// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::{debug, info};

use crate::mods::muc::{Event, OccupantPresence, PresenceKind, RoomRegistry};

/// Applies `presence` to `registry` and returns the events to emit, in order.
pub(super) fn reconcile(registry: &mut RoomRegistry, presence: OccupantPresence) -> Vec<Event> {
    let room = presence.room.clone();

    if presence.kind == PresenceKind::Error && registry.is_joining(&room) {
        registry.fail_join(&room);
        info!("Failed to join room {}.", room);
        return vec![Event::JoinFailed(presence.clone()), Event::Error(presence)];
    }

    if presence.muc_user.is_none() {
        return vec![];
    }

    let is_self = presence.is_self();

    match presence.kind {
        PresenceKind::Error => vec![Event::Error(presence)],
        PresenceKind::Unavailable => {
            let destroy = presence.destroy().cloned();
            let mut events = vec![Event::OccupantUnavailable(presence.clone())];

            if is_self {
                if registry.remove_joined(&room).is_some() {
                    info!("Left room {}.", room);
                }
                events.push(Event::SelfLeft(presence));
            }

            if let Some(destroy) = destroy {
                events.push(Event::RoomDestroyed {
                    room,
                    new_room: destroy.jid,
                    password: destroy.password,
                    reason: destroy.reason,
                });
            }

            events
        }
        PresenceKind::Available => {
            let mut events = vec![Event::OccupantAvailable(presence.clone())];

            if is_self && !registry.is_joined(&room) {
                let nick = presence
                    .nick()
                    .or_else(|| registry.joining_nick(&room))
                    .unwrap_or_default()
                    .to_string();

                debug!("Joined room {} as {}.", room, nick);
                registry.confirm_join(room, nick);
                events.push(Event::SelfJoined(presence));
            }

            events
        }
    }
}
