// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::task::Waker;

use crate::util::XMPPElement;

pub(crate) enum ModuleFuturePoll {
    Pending,
    /// The request settled. The waker (if the future was polled already) must be woken after
    /// the pending request list was unlocked.
    Ready(Option<Waker>),
}

/// A pending room transaction as seen by the client's dispatch loop, independent of the
/// transaction's result type.
pub(crate) trait ModuleFutureState: Send {
    /// Offers an inbound stanza to the request. Stanzas not belonging to it leave it pending.
    fn handle_element(&mut self, element: &XMPPElement) -> ModuleFuturePoll;
    /// Settles the request with `RequestError::TimedOut` unless it settled already.
    fn fail_with_timeout(&mut self) -> Option<Waker>;
    /// Settles the request with `RequestError::Disconnected` unless it settled already.
    fn fail_with_disconnect(&mut self) -> Option<Waker>;
}
