// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::util::{ParseError, RequestError};

#[derive(Debug, thiserror::Error)]
pub enum MucError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("No configuration form returned")]
    NoConfigurationForm,
    #[error("No unique name returned")]
    NoUniqueName,
    #[error("No nickname reserved")]
    NoNicknameReserved,
}

impl From<ParseError> for MucError {
    fn from(value: ParseError) -> Self {
        Self::Request(value.into())
    }
}

impl From<jid::Error> for MucError {
    fn from(value: jid::Error) -> Self {
        Self::Request(value.into())
    }
}
