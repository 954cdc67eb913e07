// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::warn;
use xmpp_parsers::message::MessageType;

use crate::mods::muc::{Event, Invitation, InvitationKind};
use crate::stanza::Message;

/// Classifies a MUC related message. Returns `None` for messages that are of no interest to
/// the MUC module.
pub(super) fn route_message(message: &Message) -> Option<Event> {
    let from = message.from.clone()?;
    let room = from.to_bare();

    if message.type_ == MessageType::Groupchat && message.has_subject() {
        return Some(Event::TopicChanged {
            room,
            from,
            topic: message.subject().unwrap_or_default().to_string(),
        });
    }

    if let Some(invite) = message.direct_invite() {
        return Some(Event::InviteReceived(Invitation {
            kind: InvitationKind::Direct,
            room: invite.jid,
            from,
            password: invite.password,
            reason: invite.reason,
            thread: invite.thread,
        }));
    }

    let muc_user = message.muc_user()?;

    if let Some(invite) = muc_user.invites.first() {
        match &invite.from {
            Some(inviter) => {
                return Some(Event::InviteReceived(Invitation {
                    kind: InvitationKind::Mediated,
                    room,
                    from: inviter.clone(),
                    password: muc_user.password.clone(),
                    reason: invite.reason.clone(),
                    thread: invite.thread().map(ToString::to_string),
                }))
            }
            None => warn!("Received mediated invite without sender from {}.", from),
        }
    } else if let Some(decline) = &muc_user.decline {
        match &decline.from {
            Some(decliner) => {
                return Some(Event::DeclineReceived {
                    room,
                    from: decliner.clone(),
                    reason: decline.reason.clone(),
                })
            }
            None => warn!("Received declined invite without sender from {}.", from),
        }
    }

    Some(Event::OtherMessage(message.clone()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;
    use minidom::Element;
    use pretty_assertions::assert_eq;

    use crate::{bare, jid};

    use super::*;

    fn message(xml: &str) -> Result<Message> {
        Message::try_from(Element::from_str(xml)?)
    }

    #[test]
    fn test_empty_subject_changes_topic() -> Result<()> {
        let message = message(
            r#"<message xmlns='jabber:client' from='coven@chat.shakespeare.lit/secondwitch' type='groupchat'>
                <subject/>
                <x xmlns='http://jabber.org/protocol/muc#user'><status code='104'/></x>
            </message>"#,
        )?;

        assert_eq!(
            route_message(&message),
            Some(Event::TopicChanged {
                room: bare!("coven@chat.shakespeare.lit"),
                from: jid!("coven@chat.shakespeare.lit/secondwitch"),
                topic: "".to_string(),
            })
        );
        Ok(())
    }

    #[test]
    fn test_subject_in_chat_message_is_not_a_topic() -> Result<()> {
        let message = message(
            r#"<message xmlns='jabber:client' from='hecate@shakespeare.lit/broom' type='chat'>
                <subject>Hello</subject>
            </message>"#,
        )?;

        assert_eq!(route_message(&message), None);
        Ok(())
    }

    #[test]
    fn test_direct_invite() -> Result<()> {
        let message = message(
            r#"<message xmlns='jabber:client' from='crone1@shakespeare.lit/desktop' to='hecate@shakespeare.lit'>
                <x xmlns='jabber:x:conference' jid='darkcave@macbeth.shakespeare.lit' password='cauldronburn' reason='Hey Hecate' thread='t1'/>
            </message>"#,
        )?;

        assert_eq!(
            route_message(&message),
            Some(Event::InviteReceived(Invitation {
                kind: InvitationKind::Direct,
                room: bare!("darkcave@macbeth.shakespeare.lit"),
                from: jid!("crone1@shakespeare.lit/desktop"),
                password: Some("cauldronburn".to_string()),
                reason: Some("Hey Hecate".to_string()),
                thread: Some("t1".to_string()),
            }))
        );
        Ok(())
    }

    #[test]
    fn test_only_first_mediated_invite_is_reported() -> Result<()> {
        let message = message(
            r#"<message xmlns='jabber:client' from='coven@chat.shakespeare.lit' to='hecate@shakespeare.lit'>
                <x xmlns='http://jabber.org/protocol/muc#user'>
                    <invite from='crone1@shakespeare.lit/desktop'>
                        <reason>First</reason>
                        <continue thread='t1'/>
                    </invite>
                    <invite from='crone2@shakespeare.lit/desktop'>
                        <reason>Second</reason>
                    </invite>
                    <password>cauldronburn</password>
                </x>
            </message>"#,
        )?;

        assert_eq!(
            route_message(&message),
            Some(Event::InviteReceived(Invitation {
                kind: InvitationKind::Mediated,
                room: bare!("coven@chat.shakespeare.lit"),
                from: jid!("crone1@shakespeare.lit/desktop"),
                password: Some("cauldronburn".to_string()),
                reason: Some("First".to_string()),
                thread: Some("t1".to_string()),
            }))
        );
        Ok(())
    }

    #[test]
    fn test_decline() -> Result<()> {
        let message = message(
            r#"<message xmlns='jabber:client' from='coven@chat.shakespeare.lit' to='crone1@shakespeare.lit/desktop'>
                <x xmlns='http://jabber.org/protocol/muc#user'>
                    <decline from='hecate@shakespeare.lit'>
                        <reason>Sorry, I'm too busy right now.</reason>
                    </decline>
                </x>
            </message>"#,
        )?;

        assert_eq!(
            route_message(&message),
            Some(Event::DeclineReceived {
                room: bare!("coven@chat.shakespeare.lit"),
                from: jid!("hecate@shakespeare.lit"),
                reason: Some("Sorry, I'm too busy right now.".to_string()),
            })
        );
        Ok(())
    }

    #[test]
    fn test_invite_without_sender_is_other_message() -> Result<()> {
        let message = message(
            r#"<message xmlns='jabber:client' from='coven@chat.shakespeare.lit'>
                <x xmlns='http://jabber.org/protocol/muc#user'>
                    <invite to='hecate@shakespeare.lit'/>
                </x>
            </message>"#,
        )?;

        assert_eq!(
            route_message(&message),
            Some(Event::OtherMessage(message.clone()))
        );
        Ok(())
    }

    #[test]
    fn test_plain_messages_are_ignored() -> Result<()> {
        let message = message(
            r#"<message xmlns='jabber:client' from='coven@chat.shakespeare.lit/firstwitch' type='groupchat'>
                <body>Thrice the brinded cat hath mew'd.</body>
            </message>"#,
        )?;

        assert_eq!(route_message(&message), None);
        Ok(())
    }
}
