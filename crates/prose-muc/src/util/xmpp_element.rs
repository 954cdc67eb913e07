// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use xmpp_parsers::iq::Iq;
use xmpp_parsers::presence::Presence;

use crate::ns;
use crate::stanza::Message;

#[derive(Debug, Clone)]
pub enum XMPPElement {
    Presence(Presence),
    Message(Message),
    IQ(Iq),
}

impl TryFrom<Element> for XMPPElement {
    type Error = anyhow::Error;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        if value.is("iq", ns::JABBER_CLIENT) {
            Ok(Self::IQ(Iq::try_from(value)?))
        } else if value.is("message", ns::JABBER_CLIENT) {
            Ok(Self::Message(Message::try_from(value)?))
        } else if value.is("presence", ns::JABBER_CLIENT) {
            Ok(Self::Presence(Presence::try_from(value)?))
        } else {
            Err(anyhow::format_err!(
                "Encountered unknown element '{}'",
                value.name()
            ))
        }
    }
}

impl From<Presence> for XMPPElement {
    fn from(value: Presence) -> Self {
        Self::Presence(value)
    }
}

impl From<Message> for XMPPElement {
    fn from(value: Message) -> Self {
        Self::Message(value)
    }
}

impl From<Iq> for XMPPElement {
    fn from(value: Iq) -> Self {
        Self::IQ(value)
    }
}
