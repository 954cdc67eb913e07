// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::{Element, ElementBuilder, NSChoice};

use crate::util::ParseError;

pub trait ElementExt {
    fn expect_is<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Result<(), ParseError>;

    fn attr_req(&self, name: impl AsRef<str>) -> Result<&str, ParseError>;
    fn attr_bool(&self, name: impl AsRef<str>) -> Result<Option<bool>, ParseError>;

    /// Returns the text of the first child matching `name` and `ns`, if there is one.
    fn child_text(&self, name: &str, ns: &str) -> Option<String>;
    fn non_empty_text(&self) -> Option<String>;
}

pub trait ElementBuilderExt {
    fn attr_bool_opt(self, name: impl AsRef<str>, value: Option<bool>) -> ElementBuilder;
    fn append_text_child(self, name: &str, ns: &str, text: Option<String>) -> ElementBuilder;
}

impl ElementExt for Element {
    fn expect_is<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Result<(), ParseError> {
        let ns = ns.into();
        if !self.is(name.as_ref(), ns) {
            return Err(ParseError::Generic {
                msg: format!(
                    "Expected element with name {} and namespace {}. Got {} and {} instead.",
                    name.as_ref(),
                    ns_choice_to_string(ns),
                    self.name(),
                    self.ns()
                ),
            });
        }
        Ok(())
    }

    fn attr_req(&self, name: impl AsRef<str>) -> Result<&str, ParseError> {
        self.attr(name.as_ref()).ok_or_else(|| ParseError::Generic {
            msg: format!(
                "Missing required attribute {} in element {}.",
                name.as_ref(),
                self.name()
            ),
        })
    }

    fn attr_bool(&self, name: impl AsRef<str>) -> Result<Option<bool>, ParseError> {
        self.attr(name.as_ref()).map(parse_bool).transpose()
    }

    fn child_text(&self, name: &str, ns: &str) -> Option<String> {
        self.get_child(name, ns).map(|child| child.text())
    }

    fn non_empty_text(&self) -> Option<String> {
        let text = self.text();
        (!text.is_empty()).then_some(text)
    }
}

impl ElementBuilderExt for ElementBuilder {
    fn attr_bool_opt(self, name: impl AsRef<str>, value: Option<bool>) -> ElementBuilder {
        match value {
            Some(value) => self.attr(name.as_ref(), if value { "true" } else { "false" }),
            None => self,
        }
    }

    fn append_text_child(self, name: &str, ns: &str, text: Option<String>) -> ElementBuilder {
        self.append_all(text.map(|text| Element::builder(name, ns).append(text).build()))
    }
}

pub fn parse_bool(value: impl AsRef<str>) -> Result<bool, ParseError> {
    match value.as_ref() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::Generic {
            msg: format!("Invalid boolean value '{}'.", value.as_ref()),
        }),
    }
}

fn ns_choice_to_string(ns: NSChoice) -> String {
    match ns {
        NSChoice::None => "<none>".to_string(),
        NSChoice::OneOf(ns) => ns.to_string(),
        NSChoice::AnyOf(ns_list) => ns_list.join(" or "),
        NSChoice::Any => "<any>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use anyhow::Result;

    use super::*;

    #[test]
    fn test_child_text_and_bool_attributes() -> Result<()> {
        let elem = Element::from_str(
            "<x xmlns='urn:test' continue='1' broken='maybe'><reason>Because</reason></x>",
        )?;

        assert_eq!(elem.child_text("reason", "urn:test"), Some("Because".to_string()));
        assert_eq!(elem.child_text("password", "urn:test"), None);
        assert_eq!(elem.attr_bool("continue")?, Some(true));
        assert_eq!(elem.attr_bool("missing")?, None);
        assert!(elem.attr_bool("broken").is_err());
        assert!(elem.expect_is("x", "urn:other").is_err());

        Ok(())
    }
}
