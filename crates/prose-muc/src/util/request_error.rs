// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use xmpp_parsers::stanza_error::{DefinedCondition, StanzaError};

/// The outcome of a room transaction that didn't succeed.
///
/// `XMPP` carries the room's (or the MUC service's) rejection as is. `TimedOut` and
/// `Disconnected` mean the request never settled and may or may not have been applied.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Request timed out")]
    TimedOut,
    #[error("Not connected")]
    Disconnected,
    #[error("Unexpected response to request")]
    UnexpectedResponse,
    #[error("Request rejected: {err:?}")]
    XMPP { err: StanzaError },
    #[error(transparent)]
    JidError(#[from] jid::Error),
    #[error("Request failed: {msg}")]
    Generic { msg: String },
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

/// Failure to decode a MUC payload.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed payload: {msg}")]
    Generic { msg: String },
    #[error(transparent)]
    XMPPParseError(#[from] xmpp_parsers::Error),
    #[error(transparent)]
    JidError(#[from] jid::Error),
    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),
}

impl From<xmpp_parsers::Error> for RequestError {
    fn from(value: xmpp_parsers::Error) -> Self {
        Self::ParseError(value.into())
    }
}

impl From<StanzaError> for RequestError {
    fn from(value: StanzaError) -> Self {
        Self::XMPP { err: value }
    }
}

impl RequestError {
    /// True if the request never received an answer, i.e. it timed out or the connection went
    /// away while it was in flight.
    pub fn is_unsettled(&self) -> bool {
        matches!(self, RequestError::TimedOut | RequestError::Disconnected)
    }

    /// The condition the room rejected the request with, e.g. `forbidden` when our affiliation
    /// doesn't allow moderating, or `item-not-found` for an unknown room.
    pub fn defined_condition(&self) -> Option<DefinedCondition> {
        let RequestError::XMPP {
            err: StanzaError {
                defined_condition, ..
            },
        } = self
        else {
            return None;
        };
        Some(defined_condition.clone())
    }
}
