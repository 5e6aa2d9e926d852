//! Entity definition documents.
//!
//! Vanilla entity files are JSON with `//` and `/* */` comments. Comments are
//! stripped while reading and do not survive a rewrite.

use json_comments::StripComments;
use log::debug;
use serde_json::{Map, Value};

use crate::constants::{ENTITY_KEY, NEAREST_ATTACKABLE_TARGET};
use crate::error::ParseError;

/// A parsed `minecraft:entity` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDocument {
    root: Value,
}

/// Parses comment-tolerant JSON into a document.
///
/// # Errors
/// Returns [`ParseError`] if the text is not JSON once comments are removed.
pub fn parse_document(raw: &str) -> Result<EntityDocument, ParseError> {
    let root = serde_json::from_reader(StripComments::new(raw.as_bytes()))?;
    Ok(EntityDocument { root })
}

/// Read-only view of `minecraft:entity.description`.
#[derive(Clone, Copy, Debug)]
pub struct Description<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Description<'a> {
    fn text(&self, key: &str) -> Option<&'a str> {
        self.fields?.get(key)?.as_str()
    }

    /// Namespaced identifier such as `minecraft:zombie`. Empty strings count
    /// as missing.
    #[must_use]
    pub fn identifier(&self) -> Option<&'a str> {
        self.text("identifier").filter(|id| !id.is_empty())
    }

    /// Raw `spawn_category`, if it is a string.
    #[must_use]
    pub fn spawn_category(&self) -> Option<&'a str> {
        self.text("spawn_category")
    }

    /// `true` only for a boolean `true`.
    #[must_use]
    pub fn is_spawnable(&self) -> bool {
        self.fields
            .and_then(|fields| fields.get("is_spawnable"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl EntityDocument {
    /// Wraps an already parsed tree.
    #[must_use]
    pub const fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The whole tree.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.root
    }

    /// The entity description; empty when the document has none.
    #[must_use]
    pub fn description(&self) -> Description<'_> {
        Description {
            fields: self
                .root
                .get(ENTITY_KEY)
                .and_then(|entity| entity.get("description"))
                .and_then(Value::as_object),
        }
    }

    /// Every non-empty `nearest_attackable_target` component, first from
    /// `components`, then from each entry of `component_groups`.
    ///
    /// Groups that are not objects contribute nothing.
    pub fn targeting_components_mut(&mut self) -> Vec<&mut Map<String, Value>> {
        let Some(entity) = self.root.get_mut(ENTITY_KEY).and_then(Value::as_object_mut) else {
            return Vec::new();
        };

        let mut direct = Vec::new();
        let mut grouped = Vec::new();
        for (key, value) in entity.iter_mut() {
            match key.as_str() {
                "components" => direct.extend(targeting_component(value)),
                "component_groups" => match value.as_object_mut() {
                    Some(groups) => {
                        for (name, group) in groups.iter_mut() {
                            if !group.is_object() {
                                debug!("Ignoring component group {name}: not an object");
                            }
                            grouped.extend(targeting_component(group));
                        }
                    }
                    None => debug!("Ignoring component_groups: not an object"),
                },
                _ => {}
            }
        }
        direct.append(&mut grouped);
        direct
    }

    /// Renders the tree as two-space indented JSON, keys in original order.
    /// Non-ASCII text is kept as UTF-8 rather than `\u` escaped.
    ///
    /// # Errors
    /// Propagates `serde_json` serialisation failures.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }
}

fn targeting_component(components: &mut Value) -> Option<&mut Map<String, Value>> {
    components
        .get_mut(NEAREST_ATTACKABLE_TARGET)?
        .as_object_mut()
        .filter(|component| !component.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const COMMENTED: &str = r#"
    {
      // vanilla files carry line comments
      "format_version": "1.21.0",
      "minecraft:entity": {
        /* and block comments */
        "description": {
          "identifier": "minecraft:husk", // trailing
          "spawn_category": "monster",
          "is_spawnable": true
        }
      }
    }"#;

    #[test]
    fn parses_commented_json() {
        let doc = parse_document(COMMENTED).unwrap();
        let description = doc.description();
        assert_eq!(description.identifier(), Some("minecraft:husk"));
        assert_eq!(description.spawn_category(), Some("monster"));
        assert!(description.is_spawnable());
    }

    #[test]
    fn keeps_comment_markers_inside_strings() {
        let doc = parse_document(r#"{"url": "https://example.com/a"}"#).unwrap();
        assert_eq!(doc.as_value()["url"], "https://example.com/a");
    }

    #[rstest]
    #[case("")]
    #[case("{\"minecraft:entity\": ")]
    #[case("{'single': 'quotes'}")]
    fn rejects_malformed_text(#[case] raw: &str) {
        assert!(parse_document(raw).is_err());
    }

    #[rstest]
    #[case(json!({"minecraft:entity": {"description": {"identifier": ""}}}))]
    #[case(json!({"minecraft:entity": {"description": {"identifier": 7}}}))]
    #[case(json!({"minecraft:entity": {}}))]
    #[case(json!([]))]
    fn missing_identifier(#[case] root: Value) {
        let doc = EntityDocument::from_value(root);
        assert_eq!(doc.description().identifier(), None);
        assert!(!doc.description().is_spawnable());
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!("true"), false)]
    #[case(json!(1), false)]
    fn spawnable_requires_boolean_true(#[case] flag: Value, #[case] expected: bool) {
        let doc = EntityDocument::from_value(
            json!({"minecraft:entity": {"description": {"is_spawnable": flag}}}),
        );
        assert_eq!(doc.description().is_spawnable(), expected);
    }

    #[test]
    fn collects_direct_and_grouped_targeting() {
        let mut doc = EntityDocument::from_value(json!({
            "minecraft:entity": {
                "component_groups": {
                    "minecraft:hostile": {
                        "minecraft:behavior.nearest_attackable_target": {"priority": 2}
                    },
                    "minecraft:calm": {"minecraft:movement": {"value": 0.2}},
                    "minecraft:angry": {
                        "minecraft:behavior.nearest_attackable_target": {"priority": 3}
                    }
                },
                "components": {
                    "minecraft:behavior.nearest_attackable_target": {"priority": 1}
                }
            }
        }));
        let priorities: Vec<_> = doc
            .targeting_components_mut()
            .into_iter()
            .map(|component| component["priority"].as_i64())
            .collect();
        assert_eq!(priorities, [Some(1), Some(2), Some(3)]);
    }

    #[rstest]
    #[case(json!({"minecraft:entity": {"component_groups": []}}))]
    #[case(json!({"minecraft:entity": {"component_groups": {"broken": "group"}}}))]
    #[case(json!({"minecraft:entity": {"components": {"minecraft:behavior.nearest_attackable_target": {}}}}))]
    #[case(json!({"minecraft:entity": {"components": {"minecraft:behavior.nearest_attackable_target": []}}}))]
    #[case(json!({"minecraft:entity": "not an object"}))]
    fn malformed_shapes_contribute_nothing(#[case] root: Value) {
        let mut doc = EntityDocument::from_value(root);
        assert!(doc.targeting_components_mut().is_empty());
    }

    #[test]
    fn renders_two_space_indent_in_source_order() {
        let doc = parse_document(r#"{"b": 1, /* c */ "a": [true]}"#).unwrap();
        assert_eq!(
            doc.to_pretty_json().unwrap(),
            "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}"
        );
    }

    #[test]
    fn keeps_non_ascii_text_unescaped() {
        let doc = parse_document(r#"{"name": "Écaille"}"#).unwrap();
        assert_eq!(doc.to_pretty_json().unwrap(), "{\n  \"name\": \"Écaille\"\n}");
    }
}
