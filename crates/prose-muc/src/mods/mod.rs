// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::any::Any;

use anyhow::Result;
use xmpp_parsers::iq::Iq;
use xmpp_parsers::presence::Presence;

pub use disco::Disco;
pub use muc::MUC;

use crate::client::ModuleContext;
use crate::stanza::Message;
use crate::util::XMPPElement;

pub mod disco;
pub mod muc;

pub trait Module: Any + Send + Sync {
    fn register_with(&mut self, context: ModuleContext);

    /// Called after each successful `Client::connect`, i.e. whenever a new session was established.
    fn handle_connect(&self) -> Result<()> {
        Ok(())
    }

    /// Called when the connection was re-established by resuming the previous stream.
    fn handle_resume(&self) -> Result<()> {
        Ok(())
    }

    fn handle_element(&self, element: &XMPPElement) -> Result<()> {
        match element {
            XMPPElement::Presence(ref p) => self.handle_presence_stanza(p),
            XMPPElement::Message(ref m) => self.handle_message_stanza(m),
            XMPPElement::IQ(ref i) => self.handle_iq_stanza(i),
        }
    }

    fn handle_presence_stanza(&self, _stanza: &Presence) -> Result<()> {
        Ok(())
    }
    fn handle_message_stanza(&self, _stanza: &Message) -> Result<()> {
        Ok(())
    }
    fn handle_iq_stanza(&self, _stanza: &Iq) -> Result<()> {
        Ok(())
    }
}

pub trait AnyModule: Module {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Module> AnyModule for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
