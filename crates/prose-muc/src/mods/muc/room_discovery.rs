// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;
use tracing::debug;
use xmpp_parsers::iq::Iq;

use crate::mods::muc::{MucError, MUC};
use crate::mods::Disco;
use crate::stanza::muc::ns::RESERVED_NICK_NODE;
use crate::stanza::muc::Unique;
use crate::util::RequestError;

impl MUC {
    /// XEP-0307: Asks the MUC `service` for a room name that is guaranteed to be unused.
    pub async fn get_unique_room_name(&self, service: &BareJid) -> Result<String, MucError> {
        let Some(response) = self
            .ctx
            .send_iq(
                Iq::from_get(self.ctx.generate_id(), Unique::default())
                    .with_to(service.clone().into()),
            )
            .await?
        else {
            return Err(MucError::NoUniqueName);
        };

        Unique::try_from(response)?
            .name
            .ok_or(MucError::NoUniqueName)
    }

    /// Looks up the nickname reserved for us in `room`.
    /// https://xmpp.org/extensions/xep-0045.html#reservednick
    ///
    /// Rooms that don't support the lookup, transport errors and responses without a name all
    /// yield `MucError::NoNicknameReserved`.
    pub async fn get_reserved_nick(&self, room: &BareJid) -> Result<String, MucError> {
        let result = match self.ctx.get_mod::<Disco>() {
            Ok(disco) => disco
                .query_disco_info(room.clone(), Some(RESERVED_NICK_NODE.to_string()))
                .await
                .map(|info| info.identities.into_iter().next().and_then(|i| i.name)),
            Err(err) => Err(RequestError::Generic {
                msg: err.to_string(),
            }),
        };

        match result {
            Ok(Some(nick)) if !nick.is_empty() => Ok(nick),
            Ok(_) => Err(MucError::NoNicknameReserved),
            Err(err) if err.is_unsettled() => {
                debug!("Reserved nickname lookup in {} didn't complete. {}", room, err);
                Err(MucError::NoNicknameReserved)
            }
            Err(err) => {
                debug!("Reserved nickname lookup in {} failed. {}", room, err);
                Err(MucError::NoNicknameReserved)
            }
        }
    }
}
