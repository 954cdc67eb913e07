// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use jid::Jid;
use minidom::Element;

use crate::ns;
use crate::util::{ElementBuilderExt, ElementExt, ParseError};

/// An `<invite/>` inside a muc#user payload. When sent to a room `to` is the invitee; when
/// forwarded by the room to the invitee `from` is the inviter.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Invite {
    pub from: Option<Jid>,
    pub to: Option<Jid>,
    pub reason: Option<String>,
    pub r#continue: Option<Continue>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Continue {
    pub thread: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Decline {
    pub from: Option<Jid>,
    pub to: Option<Jid>,
    pub reason: Option<String>,
}

impl Invite {
    pub fn to(jid: impl Into<Jid>) -> Self {
        Invite {
            to: Some(jid.into()),
            ..Default::default()
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn thread(&self) -> Option<&str> {
        self.r#continue
            .as_ref()
            .and_then(|c| c.thread.as_deref())
    }
}

impl From<Invite> for Element {
    fn from(value: Invite) -> Self {
        Element::builder("invite", ns::MUC_USER)
            .attr("from", value.from)
            .attr("to", value.to)
            .append_text_child("reason", ns::MUC_USER, value.reason)
            .append_all(value.r#continue)
            .build()
    }
}

impl TryFrom<Element> for Invite {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("invite", ns::MUC_USER)?;

        Ok(Invite {
            from: value.attr("from").map(Jid::from_str).transpose()?,
            to: value.attr("to").map(Jid::from_str).transpose()?,
            reason: value.child_text("reason", ns::MUC_USER),
            r#continue: value
                .get_child("continue", ns::MUC_USER)
                .map(|child| Continue::try_from(child.clone()))
                .transpose()?,
        })
    }
}

impl From<Continue> for Element {
    fn from(value: Continue) -> Self {
        Element::builder("continue", ns::MUC_USER)
            .attr("thread", value.thread)
            .build()
    }
}

impl TryFrom<Element> for Continue {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("continue", ns::MUC_USER)?;

        Ok(Continue {
            thread: value.attr("thread").map(ToString::to_string),
        })
    }
}

impl From<Decline> for Element {
    fn from(value: Decline) -> Self {
        Element::builder("decline", ns::MUC_USER)
            .attr("from", value.from)
            .attr("to", value.to)
            .append_text_child("reason", ns::MUC_USER, value.reason)
            .build()
    }
}

impl TryFrom<Element> for Decline {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("decline", ns::MUC_USER)?;

        Ok(Decline {
            from: value.attr("from").map(Jid::from_str).transpose()?,
            to: value.attr("to").map(Jid::from_str).transpose()?,
            reason: value.child_text("reason", ns::MUC_USER),
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::jid;

    use super::*;

    #[test]
    fn test_deserialize_invite_with_continue() -> Result<()> {
        let xml = r#"<invite xmlns='http://jabber.org/protocol/muc#user' from='crone1@shakespeare.lit/desktop'>
          <reason>Hey Hecate, this is the place for all good witches!</reason>
          <continue thread='e0ffe42b28561960c6b12b944a092794b9683a38'/>
        </invite>"#;

        let invite = Invite::try_from(Element::from_str(xml)?)?;

        assert_eq!(
            invite,
            Invite {
                from: Some(jid!("crone1@shakespeare.lit/desktop")),
                to: None,
                reason: Some("Hey Hecate, this is the place for all good witches!".to_string()),
                r#continue: Some(Continue {
                    thread: Some("e0ffe42b28561960c6b12b944a092794b9683a38".to_string())
                }),
            }
        );
        assert_eq!(invite.thread(), Some("e0ffe42b28561960c6b12b944a092794b9683a38"));

        Ok(())
    }

    #[test]
    fn test_deserialize_decline() -> Result<()> {
        let xml = r#"<decline xmlns='http://jabber.org/protocol/muc#user' from='hecate@shakespeare.lit'>
          <reason>Sorry, I'm too busy right now.</reason>
        </decline>"#;

        assert_eq!(
            Decline::try_from(Element::from_str(xml)?)?,
            Decline {
                from: Some(jid!("hecate@shakespeare.lit")),
                to: None,
                reason: Some("Sorry, I'm too busy right now.".to_string()),
            }
        );

        Ok(())
    }
}
