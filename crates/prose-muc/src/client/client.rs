// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Weak};
use std::task::Waker;

use anyhow::Result;
use jid::FullJid;
use minidom::Element;
use secrecy::Secret;
use tracing::{error, info};

use crate::client::builder::ClientBuilder;
use crate::client::module_context::ModuleContextInner;
use crate::client::{Event, ModuleContext, ModuleLookup};
use crate::connector::{ConnectionError, ConnectionEvent};
use crate::mods::AnyModule;
use crate::util::{ModuleFuturePoll, PinnedFuture, XMPPElement};
use crate::Event as ClientEvent;

#[derive(Clone)]
pub struct Client {
    pub(super) inner: Arc<ClientInner>,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish()
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub async fn connect(
        &self,
        jid: &FullJid,
        password: Secret<String>,
    ) -> Result<(), ConnectionError> {
        self.inner.clone().connect(jid, password).await
    }

    pub fn disconnect(&self) {
        self.inner.disconnect()
    }

    pub fn connected_jid(&self) -> Option<FullJid> {
        self.context().full_jid()
    }

    /// Returns the module of type `M`.
    ///
    /// Panics if `M` wasn't added to the `ClientBuilder`.
    pub fn get_mod<M: AnyModule + Clone>(&self) -> M {
        match self.context().get_mod::<M>() {
            Ok(m) => m,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn send_raw_stanza(&self, stanza: impl Into<Element>) -> Result<()> {
        self.context().send_stanza(stanza)
    }
}

impl Client {
    fn context(&self) -> ModuleContext {
        ModuleContext {
            inner: self.inner.context.clone(),
        }
    }
}

pub(super) struct ClientInner {
    pub context: Arc<ModuleContextInner>,
    pub mods: Arc<ModuleLookup>,
}

impl ClientInner {
    async fn connect(
        self: Arc<Self>,
        jid: &FullJid,
        password: Secret<String>,
    ) -> Result<(), ConnectionError> {
        self.disconnect();

        *self.context.jid.write() = Some(jid.clone());

        let inner = Arc::downgrade(&self);

        let connection = (self.context.connector_provider)()
            .connect(
                jid,
                password,
                Box::new(move |event| {
                    let inner = inner.clone();
                    Box::pin(async move { Self::handle_event(inner, event).await })
                        as PinnedFuture<_>
                }),
            )
            .await?;

        self.context.connection.write().replace(connection);

        info!("Connected as {}.", jid);

        for (_, m) in self.mods.iter() {
            if let Err(err) = m.read().handle_connect() {
                error!("Encountered error in module. {}", err);
            }
        }

        ModuleContext {
            inner: self.context.clone(),
        }
        .schedule_event(ClientEvent::Client(Event::Connected));

        Ok(())
    }

    fn disconnect(&self) {
        self.context.disconnect()
    }

    async fn handle_event(inner: Weak<Self>, event: ConnectionEvent) {
        let Some(inner) = inner.upgrade() else {
            return;
        };

        let ctx = ModuleContext {
            inner: inner.context.clone(),
        };

        match event {
            ConnectionEvent::Disconnected { error } => {
                info!("Disconnected. {:?}", error);
                inner.context.connection.write().take();
                inner.context.fail_pending_futures();
                ctx.schedule_event(ClientEvent::Client(Event::Disconnected { error }))
            }
            ConnectionEvent::StreamResumed => {
                info!("Stream resumed.");
                for (_, m) in inner.mods.iter() {
                    if let Err(err) = m.read().handle_resume() {
                        error!("Encountered error in module. {}", err);
                    }
                }
                ctx.schedule_event(ClientEvent::Client(Event::Resumed))
            }
            ConnectionEvent::Stanza(stanza) => {
                Self::handle_stanza(&inner.context, &inner.mods, stanza)
            }
            ConnectionEvent::TimeoutTimer => inner.context.purge_expired_futures(),
        }
    }

    fn handle_stanza(ctx: &ModuleContextInner, mods: &ModuleLookup, stanza: Element) {
        let elem = match XMPPElement::try_from(stanza) {
            Ok(elem) => elem,
            Err(err) => {
                error!("Failed to parse stanza. {}", err);
                return;
            }
        };

        let mut wakers = Vec::<Waker>::new();
        let mut idx = 0;
        let mut pending_futures = ctx.mod_futures.lock();

        while idx < pending_futures.len() {
            let poll = pending_futures[idx].state.lock().handle_element(&elem);

            match poll {
                ModuleFuturePoll::Pending => idx += 1,
                ModuleFuturePoll::Ready(waker) => {
                    pending_futures.remove(idx);
                    if let Some(waker) = waker {
                        wakers.push(waker)
                    }
                }
            }
        }
        drop(pending_futures);

        for (_, m) in mods.iter() {
            if let Err(err) = m.read().handle_element(&elem) {
                error!("Encountered error in module. {}", err);
            }
        }

        for waker in wakers {
            waker.wake()
        }
    }
}

impl TryFrom<Arc<ModuleContextInner>> for Client {
    type Error = anyhow::Error;

    fn try_from(value: Arc<ModuleContextInner>) -> std::result::Result<Self, Self::Error> {
        let mods = value.mods.upgrade().ok_or(anyhow::format_err!(
            "Used module after client was released."
        ))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                context: value,
                mods,
            }),
        })
    }
}
