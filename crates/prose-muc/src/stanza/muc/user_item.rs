// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use jid::Jid;
use minidom::Element;

use crate::util::{ElementBuilderExt, ElementExt, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Affiliation {
    Owner,
    Admin,
    Member,
    Outcast,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Moderator,
    Participant,
    Visitor,
    None,
}

/// An `<item/>` as used in muc#user, muc#admin and muc#owner payloads.
///
/// All attributes are optional since their presence depends on the context. A kick only
/// carries a nick and a role, a member list request only an affiliation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserItem {
    pub affiliation: Option<Affiliation>,
    pub role: Option<Role>,
    pub jid: Option<Jid>,
    pub nick: Option<String>,
    pub reason: Option<String>,
    pub actor: Option<String>,
}

impl UserItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_affiliation(mut self, affiliation: Affiliation) -> Self {
        self.affiliation = Some(affiliation);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_jid(mut self, jid: impl Into<Jid>) -> Self {
        self.jid = Some(jid.into());
        self
    }

    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}

impl UserItem {
    pub(crate) fn into_element(self, ns: &str) -> Element {
        Element::builder("item", ns)
            .attr("affiliation", self.affiliation.map(|a| a.to_string()))
            .attr("role", self.role.map(|r| r.to_string()))
            .attr("jid", self.jid)
            .attr("nick", self.nick)
            .append_all(
                self.actor
                    .map(|nick| Element::builder("actor", ns).attr("nick", nick)),
            )
            .append_text_child("reason", ns, self.reason)
            .build()
    }

    pub(crate) fn try_from_element(value: &Element) -> Result<Self, ParseError> {
        if value.name() != "item" {
            return Err(ParseError::Generic {
                msg: format!("Expected element with name item. Got {} instead.", value.name()),
            });
        }

        let ns = value.ns();

        Ok(UserItem {
            affiliation: value
                .attr("affiliation")
                .map(|a| parse_enum(a, "affiliation"))
                .transpose()?,
            role: value
                .attr("role")
                .map(|r| parse_enum(r, "role"))
                .transpose()?,
            jid: value.attr("jid").map(Jid::from_str).transpose()?,
            nick: value.attr("nick").map(ToString::to_string),
            reason: value.child_text("reason", &ns),
            actor: value
                .get_child("actor", ns.as_str())
                .and_then(|actor| actor.attr("nick"))
                .map(ToString::to_string),
        })
    }
}

fn parse_enum<T: FromStr>(value: &str, attr: &str) -> Result<T, ParseError> {
    T::from_str(value).map_err(|_| ParseError::Generic {
        msg: format!("Invalid {} '{}'.", attr, value),
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::jid;
    use crate::ns;

    use super::*;

    #[test]
    fn test_deserialize_admin_item() -> Result<()> {
        let xml = r#"<item xmlns='http://jabber.org/protocol/muc#admin' affiliation='outcast' jid='earlofcambridge@shakespeare.lit'>
            <reason>Treason</reason>
        </item>"#;

        let item = UserItem::try_from_element(&Element::from_str(xml)?)?;

        assert_eq!(
            item,
            UserItem::new()
                .with_affiliation(Affiliation::Outcast)
                .with_jid(jid!("earlofcambridge@shakespeare.lit"))
                .with_reason(Some("Treason".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_serialize_kick_item() -> Result<()> {
        let item = UserItem::new()
            .with_nick("pistol")
            .with_role(Role::None)
            .with_reason(Some("Avaunt, you cullion!".to_string()));

        let elem = item.clone().into_element(ns::MUC_ADMIN);

        assert_eq!(elem.attr("role"), Some("none"));
        assert_eq!(elem.attr("nick"), Some("pistol"));
        assert_eq!(elem.attr("affiliation"), None);
        assert_eq!(UserItem::try_from_element(&elem)?, item);
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_role() -> Result<()> {
        let xml = "<item xmlns='http://jabber.org/protocol/muc#user' role='overlord'/>";
        assert!(UserItem::try_from_element(&Element::from_str(xml)?).is_err());
        Ok(())
    }
}
