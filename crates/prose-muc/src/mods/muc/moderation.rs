// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::{BareJid, Jid};
use xmpp_parsers::iq::Iq;

use crate::mods::muc::{MucError, MUC};
use crate::stanza::muc::{AdminQuery, Affiliation, Role, UserItem};

/// https://xmpp.org/extensions/xep-0045.html#moderator
/// https://xmpp.org/extensions/xep-0045.html#admin
impl MUC {
    /// Bans the user with the real JID `user` by setting their affiliation to `outcast`.
    pub async fn ban(
        &self,
        room: &BareJid,
        user: impl Into<Jid>,
        reason: Option<String>,
    ) -> Result<AdminQuery, MucError> {
        self.set_room_affiliation(room, user, Affiliation::Outcast, reason)
            .await
    }

    /// Kicks the occupant `nick` by revoking their role.
    pub async fn kick(
        &self,
        room: &BareJid,
        nick: impl Into<String>,
        reason: Option<String>,
    ) -> Result<AdminQuery, MucError> {
        self.set_room_role(room, nick, Role::None, reason).await
    }

    pub async fn set_room_affiliation(
        &self,
        room: &BareJid,
        user: impl Into<Jid>,
        affiliation: Affiliation,
        reason: Option<String>,
    ) -> Result<AdminQuery, MucError> {
        let item = UserItem::new()
            .with_affiliation(affiliation)
            .with_jid(user)
            .with_reason(reason);

        self.send_admin_query(
            Iq::from_set(self.ctx.generate_id(), AdminQuery::new([item]))
                .with_to(room.clone().into()),
        )
        .await
    }

    pub async fn set_room_role(
        &self,
        room: &BareJid,
        nick: impl Into<String>,
        role: Role,
        reason: Option<String>,
    ) -> Result<AdminQuery, MucError> {
        let item = UserItem::new()
            .with_nick(nick)
            .with_role(role)
            .with_reason(reason);

        self.send_admin_query(
            Iq::from_set(self.ctx.generate_id(), AdminQuery::new([item]))
                .with_to(room.clone().into()),
        )
        .await
    }

    /// Requests the list of users matching `filter`, e.g. all users with a given affiliation.
    pub async fn get_room_members(
        &self,
        room: &BareJid,
        filter: UserItem,
    ) -> Result<AdminQuery, MucError> {
        self.send_admin_query(
            Iq::from_get(self.ctx.generate_id(), AdminQuery::new([filter]))
                .with_to(room.clone().into()),
        )
        .await
    }
}

impl MUC {
    async fn send_admin_query(&self, iq: Iq) -> Result<AdminQuery, MucError> {
        let Some(response) = self.ctx.send_iq(iq).await? else {
            return Ok(AdminQuery::default());
        };
        Ok(AdminQuery::try_from(response)?)
    }
}
