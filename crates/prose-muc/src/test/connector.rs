// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use jid::FullJid;
use minidom::Element;
use parking_lot::Mutex;
use secrecy::Secret;

use crate::client::ConnectorProvider;
use crate::connector::{
    Connection as ConnectionTrait, ConnectionError, ConnectionEvent, ConnectionEventHandler,
    Connector as ConnectorTrait,
};
use crate::util::PinnedFuture;

pub struct Connector {
    connection: Connection,
}

impl Connector {
    pub fn provider(connection: Connection) -> ConnectorProvider {
        Box::new(move || {
            Box::new(Connector {
                connection: connection.clone(),
            })
        })
    }
}

#[async_trait]
impl ConnectorTrait for Connector {
    async fn connect(
        &self,
        _jid: &FullJid,
        _password: Secret<String>,
        event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn ConnectionTrait>, ConnectionError> {
        *self.connection.inner.event_handler.lock() = Some(event_handler);
        Ok(Box::new(self.connection.clone()))
    }
}

pub type SentStanzaHandler = dyn FnMut(&Element) -> Vec<Element> + Send;

/// An in-memory connection that records all sent stanzas and lets tests feed events into the
/// client.
#[derive(Default, Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

#[derive(Default)]
struct ConnectionInner {
    sent_stanzas: Mutex<Vec<Element>>,
    stanza_handler: Mutex<Option<Box<SentStanzaHandler>>>,
    event_handler: Mutex<Option<ConnectionEventHandler>>,
}

impl Connection {
    /// Installs a handler whose returned stanzas are delivered to the client as responses to
    /// each sent stanza.
    pub fn set_stanza_handler<F>(&self, handler: F)
    where
        F: FnMut(&Element) -> Vec<Element> + Send + 'static,
    {
        *self.inner.stanza_handler.lock() = Some(Box::new(handler))
    }

    pub fn sent_stanzas(&self) -> Vec<Element> {
        self.inner.sent_stanzas.lock().clone()
    }

    pub fn sent_stanza_strings(&self) -> Vec<String> {
        self.inner
            .sent_stanzas
            .lock()
            .iter()
            .map(String::from)
            .collect()
    }

    pub fn reset(&self) {
        self.inner.sent_stanzas.lock().clear()
    }

    pub async fn receive_stanza(&self, stanza: impl Into<Element>) {
        self.send_event(ConnectionEvent::Stanza(stanza.into()))
            .await
    }

    pub async fn resume_stream(&self) {
        self.send_event(ConnectionEvent::StreamResumed).await
    }

    pub async fn fire_timeout_timer(&self) {
        self.send_event(ConnectionEvent::TimeoutTimer).await
    }

    pub async fn disconnect_with_error(&self, error: Option<ConnectionError>) {
        self.send_event(ConnectionEvent::Disconnected { error })
            .await
    }
}

impl Connection {
    fn event_future(&self, event: ConnectionEvent) -> Option<PinnedFuture<()>> {
        self.inner
            .event_handler
            .lock()
            .as_ref()
            .map(|handler| handler(event))
    }

    async fn send_event(&self, event: ConnectionEvent) {
        if let Some(fut) = self.event_future(event) {
            fut.await
        }
    }
}

impl ConnectionTrait for Connection {
    fn send_stanza(&self, stanza: Element) -> Result<()> {
        let responses = match self.inner.stanza_handler.lock().as_mut() {
            Some(handler) => handler(&stanza),
            None => vec![],
        };

        self.inner.sent_stanzas.lock().push(stanza);

        for response in responses {
            if let Some(fut) = self.event_future(ConnectionEvent::Stanza(response)) {
                tokio::spawn(fut);
            }
        }

        Ok(())
    }

    fn disconnect(&self) {}
}
