// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::any::TypeId;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::{Arc, Weak};
use std::task::Waker;
use std::time::Duration;

use anyhow::{format_err, Result};
use chrono::{DateTime, Utc};
use jid::FullJid;
use minidom::Element;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};
use xmpp_parsers::iq::Iq;

use crate::client::builder::{UndefinedConnector, DEFAULT_REQUEST_TIMEOUT};
use crate::client::{Client, ConnectorProvider, EventHandler, ModuleLookup};
use crate::connector::Connection;
use crate::deps::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};
use crate::mods::AnyModule;
use crate::util::{ModuleFutureState, PinnedFuture, RequestError, RequestFuture};
use crate::Event;

/// The capabilities a module is given to interact with the client.
#[derive(Clone)]
pub struct ModuleContext {
    pub(super) inner: Arc<ModuleContextInner>,
}

impl ModuleContext {
    pub(crate) fn send_iq(
        &self,
        iq: Iq,
    ) -> impl Future<Output = Result<Option<Element>, RequestError>> {
        let future = RequestFuture::new_iq_request(&iq.id);
        self.send_iq_with_future(iq, future)
    }

    /// Registers `future` so that it receives all incoming stanzas until it completes and sends
    /// `iq`. Fails immediately if there is no connection.
    pub(crate) fn send_iq_with_future<T: Send + 'static, U: 'static>(
        &self,
        iq: Iq,
        future: RequestFuture<T, U>,
    ) -> impl Future<Output = Result<U, RequestError>> {
        let connection = self.inner.connection.read();
        let Some(conn) = connection.as_ref() else {
            return RequestFuture::failed(RequestError::Disconnected);
        };

        let state: Arc<Mutex<dyn ModuleFutureState>> = future.state.clone();

        self.inner.mod_futures.lock().push(ModFutureStateEntry {
            state: state.clone(),
            timestamp: self.inner.time_provider.now(),
        });

        if let Err(err) = conn.send_stanza(iq.into()) {
            self.inner
                .mod_futures
                .lock()
                .retain(|entry| !entry.is_state(&state));
            return RequestFuture::failed(RequestError::Generic {
                msg: err.to_string(),
            });
        }

        future
    }

    /// Sends `stanza` if connected. Stanzas sent while disconnected are dropped.
    pub(crate) fn send_stanza(&self, stanza: impl Into<Element>) -> Result<()> {
        let Some(conn) = &*self.inner.connection.read() else {
            debug!("Dropping stanza since the client is not connected.");
            return Ok(());
        };
        conn.send_stanza(stanza.into())
    }

    pub(crate) fn full_jid(&self) -> Option<FullJid> {
        self.inner.jid.read().clone()
    }

    pub(crate) fn generate_id(&self) -> String {
        self.inner.id_provider.new_id()
    }

    /// Adds `feature` to the set announced in response to disco#info queries.
    pub(crate) fn add_feature(&self, feature: impl Into<String>) {
        self.inner.features.write().insert(feature.into());
    }

    pub(crate) fn features(&self) -> Vec<String> {
        self.inner.features.read().iter().cloned().collect()
    }

    pub(crate) fn get_mod<M: AnyModule + Clone>(&self) -> Result<M> {
        let mods = self
            .inner
            .mods
            .upgrade()
            .ok_or(format_err!("Used module after client was released."))?;

        let entry = mods
            .get(&TypeId::of::<M>())
            .ok_or(format_err!("Could not find requested module."))?;

        let m = entry
            .read()
            .as_any()
            .downcast_ref::<M>()
            .cloned()
            .ok_or(format_err!("Registered module has an unexpected type."))?;

        Ok(m)
    }

    /// Hands `event` to the event handler right away and spawns the returned future.
    pub(crate) fn schedule_event(&self, event: Event) {
        let client = match Client::try_from(self.inner.clone()) {
            Ok(client) => client,
            Err(err) => {
                warn!("Dropping event {:?}. {}", event, err);
                return;
            }
        };

        let fut = (self.inner.event_handler)(client, event);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(fut);
            }
            Err(_) => warn!("No tokio runtime available. Dropping event handler future."),
        }
    }
}

pub(crate) struct ModuleContextInner {
    pub jid: RwLock<Option<FullJid>>,
    pub connector_provider: ConnectorProvider,
    pub connection: RwLock<Option<Box<dyn Connection>>>,
    pub event_handler: EventHandler,
    pub mods: Weak<ModuleLookup>,
    pub mod_futures: Mutex<Vec<ModFutureStateEntry>>,
    pub features: RwLock<BTreeSet<String>>,
    pub id_provider: Box<dyn IDProvider>,
    pub time_provider: Box<dyn TimeProvider>,
    pub request_timeout: Duration,
}

pub(crate) struct ModFutureStateEntry {
    pub state: Arc<Mutex<dyn ModuleFutureState>>,
    pub timestamp: DateTime<Utc>,
}

impl ModFutureStateEntry {
    fn is_state(&self, state: &Arc<Mutex<dyn ModuleFutureState>>) -> bool {
        Arc::as_ptr(&self.state) as *const () == Arc::as_ptr(state) as *const ()
    }
}

impl ModuleContextInner {
    /// Takes the connection and fails all pending requests.
    pub(super) fn disconnect(&self) {
        if let Some(conn) = self.connection.write().take() {
            conn.disconnect();
        }
        self.fail_pending_futures();
    }

    pub(super) fn fail_pending_futures(&self) {
        let pending_futures = std::mem::take(&mut *self.mod_futures.lock());

        let wakers = pending_futures
            .into_iter()
            .filter_map(|entry| {
                let waker = entry.state.lock().fail_with_disconnect();
                waker
            })
            .collect::<Vec<_>>();

        for waker in wakers {
            waker.wake()
        }
    }

    /// Fails all requests that were sent longer than `request_timeout` ago.
    pub(super) fn purge_expired_futures(&self) {
        let now = self.time_provider.now();
        let timeout = self.request_timeout;

        let mut wakers = Vec::<Waker>::new();

        self.mod_futures.lock().retain(|entry| {
            let elapsed = (now - entry.timestamp).to_std().unwrap_or_default();
            if elapsed < timeout {
                return true;
            }
            if let Some(waker) = entry.state.lock().fail_with_timeout() {
                wakers.push(waker)
            }
            false
        });

        for waker in wakers {
            waker.wake()
        }
    }
}

impl Default for ModuleContext {
    fn default() -> Self {
        ModuleContext {
            inner: Arc::new(ModuleContextInner {
                connector_provider: Box::new(|| Box::new(UndefinedConnector {})),
                jid: RwLock::new(None),
                connection: Default::default(),
                event_handler: Box::new(|_, _| Box::pin(async {}) as PinnedFuture<_>),
                mods: Default::default(),
                mod_futures: Default::default(),
                features: Default::default(),
                id_provider: Box::new(UUIDProvider::new()),
                time_provider: Box::new(SystemTimeProvider::new()),
                request_timeout: DEFAULT_REQUEST_TIMEOUT,
            }),
        }
    }
}
