// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::{Deref, DerefMut};

use jid::Jid;
use minidom::Element;
use tracing::warn;
use xmpp_parsers::data_forms::DataForm;
use xmpp_parsers::message::{Message as RawMessage, MessageType, Subject};

use crate::ns;
use crate::stanza::muc::{DirectInvite, MucUser};

#[derive(Debug, PartialEq, Clone)]
pub struct Message(RawMessage);

impl Default for Message {
    fn default() -> Self {
        Self(RawMessage::new(None::<Jid>))
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for Message {
    type Target = RawMessage;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Message {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Message {
    pub fn set_to(mut self, to: impl Into<Jid>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn set_from(mut self, from: impl Into<Jid>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_type(mut self, r#type: MessageType) -> Self {
        self.type_ = r#type;
        self
    }

    pub fn set_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects
            .insert(String::new(), Subject(subject.into()));
        self
    }

    pub fn add_payload(mut self, payload: impl Into<Element>) -> Self {
        self.payloads.push(payload.into());
        self
    }
}

impl Message {
    /// Returns true if the message carries a `<subject/>` element, even an empty one.
    pub fn has_subject(&self) -> bool {
        !self.subjects.is_empty()
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_best_subject(vec![])
            .map(|(_, subject)| subject.0.as_str())
    }

    pub fn direct_invite(&self) -> Option<DirectInvite> {
        self.typed_payload("x", ns::DIRECT_MUC_INVITATIONS)
    }

    pub fn muc_user(&self) -> Option<MucUser> {
        self.typed_payload("x", ns::MUC_USER)
    }

    pub fn data_form(&self) -> Option<DataForm> {
        self.typed_payload("x", ns::DATA_FORMS)
    }
}

impl Message {
    fn typed_payload<P: TryFrom<Element>>(&self, name: &str, ns: &str) -> Option<P> {
        let payload = self.payloads.iter().find(|p| p.is(name, ns))?;
        let Ok(payload) = P::try_from(payload.clone()) else {
            warn!("Failed to parse message payload {}.", String::from(payload));
            return None;
        };
        Some(payload)
    }
}

impl From<Message> for Element {
    fn from(value: Message) -> Self {
        value.0.into()
    }
}

impl TryFrom<Element> for Message {
    type Error = anyhow::Error;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        Ok(Message(RawMessage::try_from(value)?))
    }
}

impl From<Message> for RawMessage {
    fn from(value: Message) -> Self {
        value.0
    }
}

impl From<RawMessage> for Message {
    fn from(value: RawMessage) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use crate::stanza::muc::Invite;
    use crate::{bare, jid};

    use super::*;

    #[test]
    fn test_empty_subject() -> Result<()> {
        let message = Message::try_from(Element::from_str(
            "<message xmlns='jabber:client' from='room@conf.prose.org/a' type='groupchat'><subject/></message>",
        )?)?;

        assert!(message.has_subject());
        assert_eq!(message.subject(), Some(""));
        Ok(())
    }

    #[test]
    fn test_no_subject() -> Result<()> {
        let message = Message::new()
            .set_to(jid!("room@conf.prose.org"))
            .set_type(MessageType::Groupchat);

        assert!(!message.has_subject());
        assert_eq!(message.subject(), None);
        Ok(())
    }

    #[test]
    fn test_direct_invite() -> Result<()> {
        let invite = DirectInvite {
            jid: bare!("room@conf.prose.org"),
            password: Some("topsecret".to_string()),
            reason: Some("Who knows".to_string()),
            r#continue: None,
            thread: None,
        };

        let message = Message::new()
            .set_to(jid!("recv@prose.org"))
            .add_payload(invite.clone());
        assert_eq!(message.direct_invite(), Some(invite));
        assert_eq!(message.muc_user(), None);
        Ok(())
    }

    #[test]
    fn test_muc_user() -> Result<()> {
        let muc_user = MucUser::new().with_invite(Invite {
            from: None,
            to: Some(jid!("recv@prose.org")),
            reason: Some("Some reason".to_string()),
            r#continue: None,
        });

        let message = Message::new()
            .set_to(jid!("room@conf.prose.org"))
            .add_payload(muc_user.clone());
        assert_eq!(message.muc_user(), Some(muc_user));
        Ok(())
    }
}
