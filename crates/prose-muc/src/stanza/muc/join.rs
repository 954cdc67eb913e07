// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, SecondsFormat, Utc};
use minidom::Element;
use xmpp_parsers::presence::PresencePayload;

use crate::ns;
use crate::util::{ElementBuilderExt, ElementExt, ParseError};

/// The `<x xmlns='http://jabber.org/protocol/muc'/>` payload that marks a presence as a join
/// request.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct MucJoin {
    pub password: Option<String>,
    pub history: Option<History>,
}

/// Limits the discussion history the room sends after joining.
/// https://xmpp.org/extensions/xep-0045.html#enter-managehistory
#[derive(Debug, PartialEq, Clone, Default)]
pub struct History {
    pub max_chars: Option<u32>,
    pub max_stanzas: Option<u32>,
    pub seconds: Option<u32>,
    pub since: Option<DateTime<Utc>>,
}

impl History {
    pub fn max_stanzas(count: u32) -> Self {
        History {
            max_stanzas: Some(count),
            ..Default::default()
        }
    }

    pub fn since(date: DateTime<Utc>) -> Self {
        History {
            since: Some(date),
            ..Default::default()
        }
    }
}

impl PresencePayload for MucJoin {}

impl From<MucJoin> for Element {
    fn from(value: MucJoin) -> Self {
        Element::builder("x", ns::MUC)
            .append_all(value.history)
            .append_text_child("password", ns::MUC, value.password)
            .build()
    }
}

impl TryFrom<Element> for MucJoin {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("x", ns::MUC)?;

        Ok(MucJoin {
            password: value.child_text("password", ns::MUC),
            history: value
                .get_child("history", ns::MUC)
                .map(|child| History::try_from(child.clone()))
                .transpose()?,
        })
    }
}

impl From<History> for Element {
    fn from(value: History) -> Self {
        Element::builder("history", ns::MUC)
            .attr("maxchars", value.max_chars.map(|v| v.to_string()))
            .attr("maxstanzas", value.max_stanzas.map(|v| v.to_string()))
            .attr("seconds", value.seconds.map(|v| v.to_string()))
            .attr(
                "since",
                value
                    .since
                    .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            )
            .build()
    }
}

impl TryFrom<Element> for History {
    type Error = ParseError;

    fn try_from(value: Element) -> Result<Self, Self::Error> {
        value.expect_is("history", ns::MUC)?;

        let since = value
            .attr("since")
            .map(|since| {
                DateTime::parse_from_rfc3339(since)
                    .map(|date| date.with_timezone(&Utc))
                    .map_err(|err| ParseError::Generic {
                        msg: format!("Invalid history date '{}'. {}", since, err),
                    })
            })
            .transpose()?;

        Ok(History {
            max_chars: value.attr("maxchars").map(str::parse::<u32>).transpose()?,
            max_stanzas: value.attr("maxstanzas").map(str::parse::<u32>).transpose()?,
            seconds: value.attr("seconds").map(str::parse::<u32>).transpose()?,
            since,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_serialize_empty_join() {
        let elem = Element::from(MucJoin::default());
        assert!(elem.is("x", ns::MUC));
        assert_eq!(elem.children().count(), 0);
    }

    #[test]
    fn test_deserialize_join_with_history() -> Result<()> {
        let xml = r#"<x xmlns='http://jabber.org/protocol/muc'>
            <history maxstanzas='20' since='1970-01-01T00:00:00Z'/>
            <password>cauldronburn</password>
        </x>"#;

        let join = MucJoin::try_from(Element::from_str(xml)?)?;

        assert_eq!(
            join,
            MucJoin {
                password: Some("cauldronburn".to_string()),
                history: Some(History {
                    max_chars: None,
                    max_stanzas: Some(20),
                    seconds: None,
                    since: Some(Utc.timestamp_opt(0, 0).unwrap()),
                }),
            }
        );
        Ok(())
    }

    #[test]
    fn test_serialize_history_since() {
        let elem = Element::from(History::since(Utc.timestamp_opt(0, 0).unwrap()));
        assert_eq!(elem.attr("since"), Some("1970-01-01T00:00:00Z"));
    }
}
