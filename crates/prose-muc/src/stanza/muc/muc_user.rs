// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use tracing::warn;
use xmpp_parsers::message::MessagePayload;
use xmpp_parsers::presence::PresencePayload;

use crate::ns;
use crate::stanza::muc::ns::status_code;
use crate::stanza::muc::{Decline, Destroy, Invite, UserItem};
use crate::util::{ElementBuilderExt, ElementExt, ParseError};

/// The `<x xmlns='http://jabber.org/protocol/muc#user'/>` payload found in occupant presences
/// and room messages.
///
/// Status codes are kept as plain numbers since servers send codes beyond the registry and we
/// don't want a single unknown code to turn a MUC presence into a plain one.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct MucUser {
    pub status_codes: Vec<u16>,
    pub items: Vec<UserItem>,
    pub invites: Vec<Invite>,
    pub decline: Option<Decline>,
    pub destroy: Option<Destroy>,
    pub password: Option<String>,
}

impl MucUser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.status_codes = codes.into_iter().collect();
        self
    }

    pub fn with_item(mut self, item: UserItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_invite(mut self, invite: Invite) -> Self {
        self.invites.push(invite);
        self
    }

    pub fn with_decline(mut self, decline: Decline) -> Self {
        self.decline = Some(decline);
        self
    }

    pub fn with_destroy(mut self, destroy: Destroy) -> Self {
        self.destroy = Some(destroy);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

impl MucUser {
    pub fn has_status_code(&self, code: u16) -> bool {
        self.status_codes.contains(&code)
    }

    /// True if the room flagged the stanza as referring to the receiving user.
    pub fn is_self_presence(&self) -> bool {
        self.has_status_code(status_code::SELF_PRESENCE)
    }
}

impl MessagePayload for MucUser {}
impl PresencePayload for MucUser {}

impl TryFrom<Element> for MucUser {
    type Error = ParseError;

    fn try_from(root: Element) -> Result<Self, Self::Error> {
        root.expect_is("x", ns::MUC_USER)?;

        let mut user = MucUser::default();

        // Malformed children are skipped so that a bad item can't hide the status codes.
        for child in root.children() {
            let result = match child {
                _ if child.is("status", ns::MUC_USER) => child
                    .attr_req("code")
                    .and_then(|code| Ok(code.parse::<u16>()?))
                    .map(|code| user.status_codes.push(code)),
                _ if child.is("item", ns::MUC_USER) => {
                    UserItem::try_from_element(child).map(|item| user.items.push(item))
                }
                _ if child.is("invite", ns::MUC_USER) => {
                    Invite::try_from(child.clone()).map(|invite| user.invites.push(invite))
                }
                _ if child.is("decline", ns::MUC_USER) => {
                    Decline::try_from(child.clone()).map(|decline| user.decline = Some(decline))
                }
                _ if child.is("destroy", ns::MUC_USER) => {
                    Destroy::try_from_element(child).map(|destroy| user.destroy = Some(destroy))
                }
                _ if child.is("password", ns::MUC_USER) => {
                    user.password = Some(child.text());
                    Ok(())
                }
                _ => Ok(()),
            };

            if let Err(err) = result {
                warn!("Skipping malformed <{}/> in muc#user payload. {}", child.name(), err);
            }
        }

        Ok(user)
    }
}

impl From<MucUser> for Element {
    fn from(value: MucUser) -> Self {
        Element::builder("x", ns::MUC_USER)
            .append_all(value.status_codes.into_iter().map(|code| {
                Element::builder("status", ns::MUC_USER).attr("code", code.to_string())
            }))
            .append_all(
                value
                    .items
                    .into_iter()
                    .map(|item| item.into_element(ns::MUC_USER)),
            )
            .append_all(value.invites)
            .append_all(value.decline)
            .append_all(
                value
                    .destroy
                    .map(|destroy| destroy.into_element(ns::MUC_USER)),
            )
            .append_text_child("password", ns::MUC_USER, value.password)
            .build()
    }
}
