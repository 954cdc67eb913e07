// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::{bail, Result};
use jid::Jid;
use tracing::debug;
use xmpp_parsers::disco::DiscoInfoQuery;
use xmpp_parsers::iq::{Iq, IqType};

use crate::client::ModuleContext;
use crate::event::Event as ClientEvent;
use crate::mods::Module;
use crate::ns;
use crate::stanza::{DiscoInfo, Identity};
use crate::util::RequestError;

/// XEP-0030: Service Discovery
/// https://xmpp.org/extensions/xep-0030.html
///
/// Always installed. Answers disco#info queries with the features registered by all modules.
#[derive(Default, Clone)]
pub struct Disco {
    ctx: ModuleContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A disco#info query from `from` was answered with our feature set.
    InfoQueryAnswered { from: Jid, node: Option<String> },
}

impl Module for Disco {
    fn register_with(&mut self, context: ModuleContext) {
        self.ctx = context;
        self.ctx.add_feature(ns::DISCO_INFO);
    }

    fn handle_iq_stanza(&self, stanza: &Iq) -> Result<()> {
        let IqType::Get(payload) = &stanza.payload else {
            return Ok(());
        };

        if !payload.is("query", ns::DISCO_INFO) {
            return Ok(());
        }

        let query = DiscoInfoQuery::try_from(payload.clone())?;

        let Some(from) = &stanza.from else {
            bail!("Missing 'from' in disco request.")
        };

        debug!("Answering disco#info query from {}.", from);

        let info = DiscoInfo {
            node: query.node.clone(),
            identities: vec![Identity::new("client", "pc").with_name("Prose")],
            features: self.ctx.features(),
        };

        let mut response = Iq::from_result(stanza.id.clone(), Some(info)).with_to(from.clone());
        if let Some(jid) = self.ctx.full_jid() {
            response = response.with_from(Jid::from(jid));
        }
        self.ctx.send_stanza(response)?;

        self.ctx
            .schedule_event(ClientEvent::Disco(Event::InfoQueryAnswered {
                from: from.clone(),
                node: query.node,
            }));

        Ok(())
    }
}

impl Disco {
    pub async fn query_disco_info(
        &self,
        from: impl Into<Jid>,
        node: Option<String>,
    ) -> Result<DiscoInfo, RequestError> {
        let response = self
            .ctx
            .send_iq(
                Iq::from_get(self.ctx.generate_id(), DiscoInfoQuery { node })
                    .with_to(from.into()),
            )
            .await?
            .ok_or(RequestError::UnexpectedResponse)?;

        Ok(DiscoInfo::try_from(response)?)
    }

    /// The features currently announced in response to disco#info queries.
    pub fn features(&self) -> Vec<String> {
        self.ctx.features()
    }
}
