// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use xmpp_parsers::data_forms::DataForm;
use xmpp_parsers::iq::{IqGetPayload, IqResultPayload, IqSetPayload};

use crate::ns;
use crate::stanza::muc::Destroy;
use crate::util::{ElementExt, ParseError};

/// A `<query xmlns='http://jabber.org/protocol/muc#owner'/>` which carries either the room
/// configuration form or a destroy request.
#[derive(Debug, Clone, Default)]
pub struct OwnerQuery {
    pub form: Option<DataForm>,
    pub destroy: Option<Destroy>,
}

impl OwnerQuery {
    pub fn with_form(form: DataForm) -> Self {
        OwnerQuery {
            form: Some(form),
            destroy: None,
        }
    }

    pub fn with_destroy(destroy: Destroy) -> Self {
        OwnerQuery {
            form: None,
            destroy: Some(destroy),
        }
    }
}

impl IqGetPayload for OwnerQuery {}
impl IqSetPayload for OwnerQuery {}
impl IqResultPayload for OwnerQuery {}

impl From<OwnerQuery> for Element {
    fn from(value: OwnerQuery) -> Self {
        Element::builder("query", ns::MUC_OWNER)
            .append_all(value.form)
            .append_all(
                value
                    .destroy
                    .map(|destroy| destroy.into_element(ns::MUC_OWNER)),
            )
            .build()
    }
}

impl TryFrom<Element> for OwnerQuery {
    type Error = ParseError;

    fn try_from(root: Element) -> Result<Self, Self::Error> {
        root.expect_is("query", ns::MUC_OWNER)?;

        let mut query = OwnerQuery::default();

        for child in root.children() {
            match child {
                _ if child.is("x", ns::DATA_FORMS) => {
                    query.form = Some(DataForm::try_from(child.clone())?)
                }
                _ if child.is("destroy", ns::MUC_OWNER) => {
                    query.destroy = Some(Destroy::try_from_element(child)?)
                }
                _ => (),
            }
        }

        Ok(query)
    }
}
