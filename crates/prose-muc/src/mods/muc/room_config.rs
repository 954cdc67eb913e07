// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;
use xmpp_parsers::data_forms::{DataForm, DataFormType};
use xmpp_parsers::iq::Iq;

use crate::mods::muc::{MucError, MUC};
use crate::stanza::muc::{Destroy, OwnerQuery};

/// https://xmpp.org/extensions/xep-0045.html#owner
impl MUC {
    pub async fn get_room_config(&self, room: &BareJid) -> Result<DataForm, MucError> {
        let response = self
            .send_owner_query(
                Iq::from_get(self.ctx.generate_id(), OwnerQuery::default())
                    .with_to(room.clone().into()),
            )
            .await?;

        response.form.ok_or(MucError::NoConfigurationForm)
    }

    /// Submits `form`. The form's type is always sent as `submit`.
    pub async fn configure_room(
        &self,
        room: &BareJid,
        mut form: DataForm,
    ) -> Result<OwnerQuery, MucError> {
        form.type_ = DataFormType::Submit;

        self.send_owner_query(
            Iq::from_set(self.ctx.generate_id(), OwnerQuery::with_form(form))
                .with_to(room.clone().into()),
        )
        .await
    }

    pub async fn destroy_room(
        &self,
        room: &BareJid,
        destroy: Destroy,
    ) -> Result<OwnerQuery, MucError> {
        self.send_owner_query(
            Iq::from_set(self.ctx.generate_id(), OwnerQuery::with_destroy(destroy))
                .with_to(room.clone().into()),
        )
        .await
    }
}

impl MUC {
    async fn send_owner_query(&self, iq: Iq) -> Result<OwnerQuery, MucError> {
        let Some(response) = self.ctx.send_iq(iq).await? else {
            return Ok(OwnerQuery::default());
        };
        Ok(OwnerQuery::try_from(response)?)
    }
}
