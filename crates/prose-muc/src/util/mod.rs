// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::future::Future;
use std::pin::Pin;

pub use element_ext::{ElementBuilderExt, ElementExt};
pub(crate) use module_future_state::{ModuleFuturePoll, ModuleFutureState};
pub use request_error::{ParseError, RequestError};
pub(crate) use request_future::RequestFuture;
pub use xmpp_element::XMPPElement;

pub mod element_ext;
mod module_future_state;
mod request_error;
mod request_future;
mod xmpp_element;

pub type PinnedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
