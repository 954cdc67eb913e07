// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use xmpp_parsers::presence;

pub use disco_info::{DiscoInfo, Identity};
pub use message::Message;

pub mod disco_info;
pub mod message;
pub mod muc;
pub mod ns;
