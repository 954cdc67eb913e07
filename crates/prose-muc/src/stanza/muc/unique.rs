// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use xmpp_parsers::iq::{IqGetPayload, IqResultPayload};

use crate::ns;
use crate::util::{ElementExt, ParseError};

/// XEP-0307: Unique Room Names for Multi-User Chat. Sent empty, returned with the name.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Unique {
    pub name: Option<String>,
}

impl IqGetPayload for Unique {}
impl IqResultPayload for Unique {}

impl From<Unique> for Element {
    fn from(value: Unique) -> Self {
        Element::builder("unique", ns::MUC_UNIQUE)
            .append_all(value.name)
            .build()
    }
}

impl TryFrom<Element> for Unique {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("unique", ns::MUC_UNIQUE)?;

        Ok(Unique {
            name: value.non_empty_text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use super::*;

    #[test]
    fn test_deserialize_unique_name() -> Result<()> {
        let xml = "<unique xmlns='http://jabber.org/protocol/muc#unique'>6d9423a55f499b29ad20bf7b2bdea4f4b885ead1</unique>";

        assert_eq!(
            Unique::try_from(Element::from_str(xml)?)?,
            Unique {
                name: Some("6d9423a55f499b29ad20bf7b2bdea4f4b885ead1".to_string())
            }
        );
        Ok(())
    }

    #[test]
    fn test_deserialize_empty_unique() -> Result<()> {
        let xml = "<unique xmlns='http://jabber.org/protocol/muc#unique'/>";
        assert_eq!(Unique::try_from(Element::from_str(xml)?)?, Unique::default());
        Ok(())
    }
}
