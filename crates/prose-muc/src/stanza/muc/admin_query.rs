// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use xmpp_parsers::iq::{IqGetPayload, IqResultPayload, IqSetPayload};

use crate::ns;
use crate::stanza::muc::UserItem;
use crate::util::{ElementExt, ParseError};

/// A `<query xmlns='http://jabber.org/protocol/muc#admin'/>` used for moderation and for
/// retrieving affiliation or role lists.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct AdminQuery {
    pub items: Vec<UserItem>,
}

impl AdminQuery {
    pub fn new(items: impl IntoIterator<Item = UserItem>) -> Self {
        AdminQuery {
            items: items.into_iter().collect(),
        }
    }
}

impl IqGetPayload for AdminQuery {}
impl IqSetPayload for AdminQuery {}
impl IqResultPayload for AdminQuery {}

impl From<AdminQuery> for Element {
    fn from(value: AdminQuery) -> Self {
        Element::builder("query", ns::MUC_ADMIN)
            .append_all(
                value
                    .items
                    .into_iter()
                    .map(|item| item.into_element(ns::MUC_ADMIN)),
            )
            .build()
    }
}

impl TryFrom<Element> for AdminQuery {
    type Error = ParseError;

    fn try_from(root: Element) -> Result<Self, Self::Error> {
        root.expect_is("query", ns::MUC_ADMIN)?;

        let items = root
            .children()
            .filter(|child| child.is("item", ns::MUC_ADMIN))
            .map(UserItem::try_from_element)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AdminQuery { items })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use crate::stanza::muc::{Affiliation, Role};

    use super::*;

    #[test]
    fn test_deserialize_member_list() -> Result<()> {
        let xml = r#"<query xmlns='http://jabber.org/protocol/muc#admin'>
            <item affiliation='member' jid='hag66@shakespeare.lit' nick='thirdwitch'/>
            <item affiliation='member' jid='hecate@shakespeare.lit' role='participant'/>
        </query>"#;

        let query = AdminQuery::try_from(Element::from_str(xml)?)?;

        assert_eq!(query.items.len(), 2);
        assert_eq!(query.items[0].nick.as_deref(), Some("thirdwitch"));
        assert_eq!(query.items[1].role, Some(Role::Participant));
        assert!(query
            .items
            .iter()
            .all(|item| item.affiliation == Some(Affiliation::Member)));
        Ok(())
    }

    #[test]
    fn test_items_use_admin_namespace() {
        let elem = Element::from(AdminQuery::new([
            UserItem::new().with_affiliation(Affiliation::Member)
        ]));

        let item = elem.get_child("item", ns::MUC_ADMIN);
        assert_eq!(item.and_then(|i| i.attr("affiliation")), Some("member"));
    }
}
