// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use admin_query::AdminQuery;
pub use destroy::Destroy;
pub use direct_invite::DirectInvite;
pub use join::{History, MucJoin};
pub use mediated_invite::{Continue, Decline, Invite};
pub use muc_user::MucUser;
pub use owner_query::OwnerQuery;
pub use unique::Unique;
pub use user_item::{Affiliation, Role, UserItem};

pub mod admin_query;
mod destroy;
pub mod direct_invite;
pub mod join;
pub mod mediated_invite;
pub mod muc_user;
pub mod ns;
pub mod owner_query;
pub mod unique;
pub mod user_item;
