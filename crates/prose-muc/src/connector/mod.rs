// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connector::{Connection, ConnectionError, ConnectionEvent, ConnectionEventHandler, Connector};

mod connector;
