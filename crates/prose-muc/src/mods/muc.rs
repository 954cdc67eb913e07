// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use jid::{BareJid, Jid};
use minidom::Element;
use parking_lot::Mutex;
use tracing::{error, info};
use xmpp_parsers::data_forms::{DataForm, DataFormType, Field, FieldType};
use xmpp_parsers::message::MessageType;
use xmpp_parsers::presence::{self, Presence};

pub use error::MucError;
pub use event::{Event, Invitation, InvitationKind};
pub use occupant_presence::{OccupantPresence, PresenceKind};
pub use room_registry::RoomRegistry;

use crate::client::ModuleContext;
use crate::event::Event as ClientEvent;
use crate::mods::Module;
use crate::ns;
use crate::stanza::muc::ns::request;
use crate::stanza::muc::{Decline, DirectInvite, History, Invite, MucJoin, MucUser};
use crate::stanza::Message;

mod error;
mod event;
mod message_router;
mod moderation;
mod occupant_presence;
mod presence_reconciler;
mod room_config;
mod room_discovery;
mod room_registry;

/// XEP-0045: Multi-User Chat
/// https://xmpp.org/extensions/xep-0045.html
///
/// Keeps track of the rooms we're joining or have joined, rejoins them after the session was
/// re-established and emits membership events for incoming room presences and messages.
#[derive(Default, Clone)]
pub struct MUC {
    ctx: ModuleContext,
    rooms: Arc<Mutex<RoomRegistry>>,
}

#[derive(Debug, Clone, Default)]
pub struct JoinRoomOptions {
    pub password: Option<String>,
    pub history: Option<History>,
    /// Additional payloads sent along with the join presence (e.g. entity capabilities).
    pub payloads: Vec<Element>,
}

impl Module for MUC {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context;
        self.ctx.add_feature(ns::MUC);
        self.ctx.add_feature(ns::DIRECT_MUC_INVITATIONS);
        self.ctx.add_feature(ns::HATS);
    }

    fn handle_connect(&self) -> Result<()> {
        self.rejoin_rooms();
        Ok(())
    }

    fn handle_resume(&self) -> Result<()> {
        self.rejoin_rooms();
        Ok(())
    }

    fn handle_presence_stanza(&self, stanza: &Presence) -> Result<()> {
        let Some(presence) = OccupantPresence::new(stanza) else {
            return Ok(());
        };

        let events = presence_reconciler::reconcile(&mut self.rooms.lock(), presence);

        for event in events {
            self.ctx.schedule_event(ClientEvent::MUC(event));
        }
        Ok(())
    }

    fn handle_message_stanza(&self, stanza: &Message) -> Result<()> {
        if let Some(event) = message_router::route_message(stanza) {
            self.ctx.schedule_event(ClientEvent::MUC(event));
        }
        Ok(())
    }
}

impl MUC {
    /// Sends a join request to `room` under `nick`. The room is considered joining until the
    /// room either confirms or rejects the request, which is reported through
    /// `Event::SelfJoined` or `Event::JoinFailed` respectively.
    pub fn join_room(
        &self,
        room: &BareJid,
        nick: impl AsRef<str>,
        options: JoinRoomOptions,
    ) -> Result<()> {
        let occupant = room.with_resource_str(nick.as_ref())?;

        self.rooms.lock().begin_join(room.clone(), nick.as_ref());

        let mut presence = Presence::new(presence::Type::None).with_to(Jid::from(occupant));
        presence.payloads.push(
            MucJoin {
                password: options.password,
                history: options.history,
            }
            .into(),
        );
        presence.payloads.extend(options.payloads);

        self.ctx.send_stanza(presence)
    }

    /// Sends an unavailable presence to our occupant in `room`. The room's reply is what
    /// eventually removes the room from the joined rooms.
    pub fn leave_room(
        &self,
        room: &BareJid,
        nick: impl AsRef<str>,
        status: Option<String>,
    ) -> Result<()> {
        let occupant = room.with_resource_str(nick.as_ref())?;

        let mut presence =
            Presence::new(presence::Type::Unavailable).with_to(Jid::from(occupant));
        if let Some(status) = status {
            presence.statuses.insert(String::new(), status);
        }

        self.ctx.send_stanza(presence)
    }

    /// Asks `room` to forward mediated invitations to the invitees.
    pub fn invite(&self, room: &BareJid, invites: Vec<Invite>) -> Result<()> {
        let muc_user = MucUser {
            invites,
            ..Default::default()
        };

        self.ctx.send_stanza(
            Message::new()
                .set_id(self.ctx.generate_id())
                .set_to(room.clone())
                .add_payload(muc_user),
        )
    }

    /// Sends a XEP-0249 invitation straight to `to`.
    pub fn direct_invite(&self, to: impl Into<Jid>, invite: DirectInvite) -> Result<()> {
        self.ctx.send_stanza(
            Message::new()
                .set_id(self.ctx.generate_id())
                .set_to(to)
                .add_payload(invite),
        )
    }

    /// Declines a mediated invitation received from `sender` through `room`.
    pub fn decline_invite(
        &self,
        room: &BareJid,
        sender: impl Into<Jid>,
        reason: Option<String>,
    ) -> Result<()> {
        let muc_user = MucUser::new().with_decline(Decline {
            from: None,
            to: Some(sender.into()),
            reason,
        });

        self.ctx.send_stanza(
            Message::new()
                .set_id(self.ctx.generate_id())
                .set_to(room.clone())
                .add_payload(muc_user),
        )
    }

    pub fn change_nick(&self, room: &BareJid, nick: impl AsRef<str>) -> Result<()> {
        let occupant = room.with_resource_str(nick.as_ref())?;
        self.ctx
            .send_stanza(Presence::new(presence::Type::None).with_to(Jid::from(occupant)))
    }

    pub fn set_subject(&self, room: &BareJid, subject: impl Into<String>) -> Result<()> {
        self.ctx.send_stanza(
            Message::new()
                .set_id(self.ctx.generate_id())
                .set_type(MessageType::Groupchat)
                .set_to(room.clone())
                .set_subject(subject),
        )
    }

    /// Asks the moderators of `room` to grant us voice.
    /// https://xmpp.org/extensions/xep-0045.html#requestvoice
    pub fn request_room_voice(&self, room: &BareJid) -> Result<()> {
        let form = DataForm {
            type_: DataFormType::Submit,
            form_type: Some(ns::MUC_REQUEST.to_string()),
            title: None,
            instructions: None,
            fields: vec![Field::new(request::ROLE, FieldType::TextSingle).with_value("participant")],
        };

        self.ctx.send_stanza(
            Message::new()
                .set_id(self.ctx.generate_id())
                .set_to(room.clone())
                .add_payload(form),
        )
    }
}

impl MUC {
    /// Rooms with a confirmed membership and the nickname the room assigned to us.
    pub fn joined_rooms(&self) -> Vec<(BareJid, String)> {
        self.rooms.lock().joined_rooms()
    }

    /// Rooms with a join request in flight.
    pub fn joining_rooms(&self) -> Vec<(BareJid, String)> {
        self.rooms.lock().joining_rooms()
    }

    pub fn joined_nick(&self, room: &BareJid) -> Option<String> {
        self.rooms.lock().joined_nick(room).map(ToString::to_string)
    }
}

impl MUC {
    /// Replays all joining rooms, then all joined rooms through `join_room`.
    fn rejoin_rooms(&self) {
        let joining_rooms = self.rooms.lock().take_joining_rooms();
        self.rejoin(joining_rooms);

        let joined_rooms = self.rooms.lock().take_joined_rooms();
        self.rejoin(joined_rooms);
    }

    fn rejoin(&self, rooms: Vec<(BareJid, String)>) {
        for (room, nick) in rooms {
            info!("Rejoining room {} as {}.", room, nick);

            if let Err(err) = self.join_room(&room, &nick, JoinRoomOptions::default()) {
                error!("Failed to rejoin room {}. {}", room, err);
            }
        }
    }
}
