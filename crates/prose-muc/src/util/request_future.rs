// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use minidom::Element;
use parking_lot::Mutex;
use tracing::warn;
use xmpp_parsers::iq::IqType;

use crate::util::module_future_state::{ModuleFuturePoll, ModuleFutureState};
use crate::util::request_error::RequestError;
use crate::util::XMPPElement;

pub(crate) enum ElementReducerPoll {
    Pending,
    Ready,
}

type ElementReducer<T> =
    Box<dyn Fn(&mut T, &XMPPElement) -> Result<ElementReducerPoll, RequestError> + Send>;
type ResultTransformer<T, U> = fn(T) -> U;

/// A future that is fed incoming stanzas by the client until its reducer declares it complete.
pub(crate) struct RequestFuture<T: Send, U> {
    pub(crate) state: Arc<Mutex<ReducerFutureState<T, U>>>,
}

pub(crate) struct IQReducerState {
    request_id: String,
    element: Option<Element>,
}

impl RequestFuture<IQReducerState, Option<Element>> {
    pub fn new_iq_request(id: impl Into<String>) -> Self {
        let id = id.into();
        RequestFuture::new(
            id.clone(),
            IQReducerState {
                request_id: id,
                element: None,
            },
            |state, element| {
                let XMPPElement::IQ(iq) = element else {
                    return Ok(ElementReducerPoll::Pending);
                };

                if iq.id != state.request_id {
                    return Ok(ElementReducerPoll::Pending);
                }

                match &iq.payload {
                    IqType::Result(payload) => {
                        state.element = payload.clone();
                        Ok(ElementReducerPoll::Ready)
                    }
                    IqType::Error(err) => Err(RequestError::XMPP { err: err.clone() }),
                    IqType::Get(_) | IqType::Set(_) => Err(RequestError::UnexpectedResponse),
                }
            },
            |state| state.element,
        )
    }
}

impl<T: Send, U> RequestFuture<T, U> {
    pub fn new<R>(
        identifier: impl Into<String>,
        initial_value: T,
        reducer: R,
        transformer: ResultTransformer<T, U>,
    ) -> Self
    where
        R: Fn(&mut T, &XMPPElement) -> Result<ElementReducerPoll, RequestError> + Send + 'static,
    {
        RequestFuture {
            state: Arc::new(Mutex::new(ReducerFutureState {
                identifier: identifier.into(),
                reducer: Box::new(reducer),
                transformer,
                value: Some(initial_value),
                result: None,
                waker: None,
            })),
        }
    }

    pub fn failed(err: RequestError) -> Self {
        RequestFuture {
            state: Arc::new(Mutex::new(ReducerFutureState {
                identifier: "".to_string(),
                reducer: Box::new(|_, _| Err(RequestError::UnexpectedResponse)),
                transformer: |_| unreachable!("Executed transformer in failed RequestFuture"),
                value: None,
                result: Some(Err(err)),
                waker: None,
            })),
        }
    }
}

pub(crate) struct ReducerFutureState<T, U> {
    identifier: String,
    reducer: ElementReducer<T>,
    transformer: ResultTransformer<T, U>,
    value: Option<T>,
    result: Option<Result<(), RequestError>>,
    waker: Option<Waker>,
}

impl<T: Send, U> ReducerFutureState<T, U> {
    fn settle(&mut self, result: Result<(), RequestError>) -> Option<Waker> {
        if self.result.is_none() {
            self.result = Some(result);
        }
        self.waker.take()
    }
}

impl<T: Send, U> ModuleFutureState for ReducerFutureState<T, U> {
    fn handle_element(&mut self, element: &XMPPElement) -> ModuleFuturePoll {
        if self.result.is_some() {
            return ModuleFuturePoll::Ready(self.waker.take());
        }

        let Some(value) = self.value.as_mut() else {
            return ModuleFuturePoll::Ready(self.settle(Err(RequestError::UnexpectedResponse)));
        };

        match (self.reducer)(value, element) {
            Err(err) => ModuleFuturePoll::Ready(self.settle(Err(err))),
            Ok(ElementReducerPoll::Ready) => ModuleFuturePoll::Ready(self.settle(Ok(()))),
            Ok(ElementReducerPoll::Pending) => ModuleFuturePoll::Pending,
        }
    }

    fn fail_with_timeout(&mut self) -> Option<Waker> {
        warn!("Request with id '{}' timed out.", self.identifier);
        self.settle(Err(RequestError::TimedOut))
    }

    fn fail_with_disconnect(&mut self) -> Option<Waker> {
        self.settle(Err(RequestError::Disconnected))
    }
}

impl<T: Send, U> Future for RequestFuture<T, U> {
    type Output = Result<U, RequestError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.lock();

        let Some(result) = state.result.take() else {
            state.waker = Some(cx.waker().clone());
            return Poll::Pending;
        };

        if let Err(err) = result {
            return Poll::Ready(Err(err));
        }

        let Some(value) = state.value.take() else {
            return Poll::Ready(Err(RequestError::Generic {
                msg: "RequestFuture polled after completion".to_string(),
            }));
        };

        Poll::Ready(Ok((state.transformer)(value)))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use xmpp_parsers::iq::Iq;

    use super::*;

    fn iq(xml: &str) -> XMPPElement {
        XMPPElement::IQ(Iq::try_from(Element::from_str(xml).unwrap()).unwrap())
    }

    #[test]
    fn test_iq_request_ignores_unrelated_ids() {
        let future = RequestFuture::new_iq_request("id-1");
        let mut state = future.state.lock();

        assert!(matches!(
            state.handle_element(&iq("<iq xmlns='jabber:client' id='id-2' type='result'/>")),
            ModuleFuturePoll::Pending
        ));
        assert!(matches!(
            state.handle_element(&iq("<iq xmlns='jabber:client' id='id-1' type='result'/>")),
            ModuleFuturePoll::Ready(None)
        ));
    }

    #[test]
    fn test_first_settlement_wins() {
        let future = RequestFuture::new_iq_request("id-1");
        let mut state = future.state.lock();

        _ = state.fail_with_timeout();
        _ = state.fail_with_disconnect();

        assert!(matches!(state.result, Some(Err(RequestError::TimedOut))));
    }
}
