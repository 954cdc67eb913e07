// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use jid::BareJid;
use minidom::Element;

use crate::util::{ElementBuilderExt, ElementExt, ParseError};

/// A `<destroy/>` element. Sent by an owner in a muc#owner query and reflected by the room in
/// the muc#user payload of the final unavailable presences.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Destroy {
    /// An alternate venue occupants are pointed to.
    pub jid: Option<BareJid>,
    pub password: Option<String>,
    pub reason: Option<String>,
}

impl Destroy {
    pub(crate) fn into_element(self, ns: &str) -> Element {
        Element::builder("destroy", ns)
            .attr("jid", self.jid)
            .append_text_child("password", ns, self.password)
            .append_text_child("reason", ns, self.reason)
            .build()
    }

    pub(crate) fn try_from_element(value: &Element) -> Result<Self, ParseError> {
        let ns = value.ns();
        value.expect_is("destroy", ns.as_str())?;

        Ok(Destroy {
            jid: value.attr("jid").map(BareJid::from_str).transpose()?,
            password: value.child_text("password", &ns),
            reason: value.child_text("reason", &ns),
        })
    }
}
