// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// The disco#info node under which a room announces the user's reserved nickname.
/// https://xmpp.org/extensions/xep-0045.html#reservednick
pub const RESERVED_NICK_NODE: &str = "x-roomuser-item";

/// https://xmpp.org/extensions/xep-0045.html#registrar-statuscodes
pub mod status_code {
    /// Inform user that presence refers to itself
    pub const SELF_PRESENCE: u16 = 110;
    /// Inform occupants that room logging is now enabled
    pub const LOGGING_ENABLED: u16 = 170;
    /// Inform user that a new room has been created
    pub const ROOM_CREATED: u16 = 201;
    /// Inform user that service has assigned or modified occupant's roomnick
    pub const NICK_ASSIGNED: u16 = 210;
    /// Inform user that they have been banned from the room
    pub const BANNED: u16 = 301;
    /// Inform all occupants of new room nickname
    pub const NEW_NICK: u16 = 303;
    /// Inform user that they have been kicked from the room
    pub const KICKED: u16 = 307;
}

/// https://xmpp.org/extensions/xep-0045.html#registrar-formtype-request
pub mod request {
    /// User ID
    pub const JID: &str = "muc#jid";
    /// Whether to grant voice
    pub const REQUEST_ALLOW: &str = "muc#request_allow";
    /// Requested role
    pub const ROLE: &str = "muc#role";
    /// Room Nickname
    pub const ROOM_NICK: &str = "muc#roomnick";
}
