// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use xmpp_parsers::iq::IqResultPayload;

use crate::ns;
use crate::util::{ElementExt, ParseError};

/// The result of a disco#info query.
///
/// Unlike `xmpp_parsers::disco::DiscoInfoResult` this type doesn't require the response to
/// contain any features or identities, which servers routinely omit for node queries such as
/// the reserved room nickname lookup.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct DiscoInfo {
    pub node: Option<String>,
    pub identities: Vec<Identity>,
    pub features: Vec<String>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Identity {
    pub category: String,
    pub r#type: String,
    pub name: Option<String>,
    pub lang: Option<String>,
}

impl Identity {
    pub fn new(category: impl Into<String>, r#type: impl Into<String>) -> Self {
        Identity {
            category: category.into(),
            r#type: r#type.into(),
            name: None,
            lang: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl TryFrom<Element> for DiscoInfo {
    type Error = ParseError;

    fn try_from(root: Element) -> Result<Self, Self::Error> {
        root.expect_is("query", ns::DISCO_INFO)?;

        let mut info = DiscoInfo {
            node: root.attr("node").map(ToString::to_string),
            ..Default::default()
        };

        for child in root.children() {
            match child {
                _ if child.is("identity", ns::DISCO_INFO) => {
                    info.identities.push(Identity::try_from(child.clone())?)
                }
                _ if child.is("feature", ns::DISCO_INFO) => {
                    info.features.push(child.attr_req("var")?.to_string())
                }
                _ => (),
            }
        }

        Ok(info)
    }
}

impl From<DiscoInfo> for Element {
    fn from(value: DiscoInfo) -> Self {
        Element::builder("query", ns::DISCO_INFO)
            .attr("node", value.node)
            .append_all(value.identities)
            .append_all(
                value
                    .features
                    .into_iter()
                    .map(|var| Element::builder("feature", ns::DISCO_INFO).attr("var", var)),
            )
            .build()
    }
}

impl IqResultPayload for DiscoInfo {}

impl TryFrom<Element> for Identity {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("identity", ns::DISCO_INFO)?;

        Ok(Identity {
            category: value.attr("category").unwrap_or_default().to_string(),
            r#type: value.attr("type").unwrap_or_default().to_string(),
            name: value.attr("name").map(ToString::to_string),
            lang: value.attr("xml:lang").map(ToString::to_string),
        })
    }
}

impl From<Identity> for Element {
    fn from(value: Identity) -> Self {
        Element::builder("identity", ns::DISCO_INFO)
            .attr("category", value.category)
            .attr("type", value.r#type)
            .attr("name", value.name)
            .attr("xml:lang", value.lang)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use super::*;

    #[test]
    fn test_deserialize_reserved_nick_response() -> Result<()> {
        let xml = r#"<query xmlns='http://jabber.org/protocol/disco#info' node='x-roomuser-item'>
            <identity category='conference' name='thirdwitch' type='text'/>
        </query>"#;

        let info = DiscoInfo::try_from(Element::from_str(xml)?)?;

        assert_eq!(
            info,
            DiscoInfo {
                node: Some("x-roomuser-item".to_string()),
                identities: vec![Identity::new("conference", "text").with_name("thirdwitch")],
                features: vec![],
            }
        );
        Ok(())
    }

    #[test]
    fn test_deserialize_empty_response() -> Result<()> {
        let xml = "<query xmlns='http://jabber.org/protocol/disco#info'/>";
        assert_eq!(
            DiscoInfo::try_from(Element::from_str(xml)?)?,
            DiscoInfo::default()
        );
        Ok(())
    }

    #[test]
    fn test_serialize_features() -> Result<()> {
        let info = DiscoInfo {
            node: None,
            identities: vec![Identity::new("client", "pc")],
            features: vec![ns::DISCO_INFO.to_string(), ns::MUC.to_string()],
        };

        let elem = Element::from(info.clone());
        assert_eq!(elem.children().count(), 3);
        assert_eq!(DiscoInfo::try_from(elem)?, info);
        Ok(())
    }
}
