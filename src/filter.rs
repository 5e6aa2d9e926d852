//! Targeting filter trees and the player-targeting rewrite.
//!
//! A filter node is either a leaf condition (`test`, `subject`, `value`) or a
//! group whose children sit under `any_of` and/or `all_of`. Groups are walked
//! the same way whichever combinator holds them.

use serde_json::{Map, Value};

use crate::constants::{PLAYER_FAMILY, PLAYER_SUBJECT, PLAYER_TEST, VOID_FAMILY};

/// Logical OR combinator key.
pub const ANY_OF: &str = "any_of";
/// Logical AND combinator key.
pub const ALL_OF: &str = "all_of";

/// Borrowed, classified view of one filter node.
#[derive(Debug)]
pub enum FilterNode<'a> {
    /// A condition with `test`, `subject` and `value` fields.
    Leaf(LeafFilter<'a>),
    /// A group holding child nodes under one or both combinators.
    Composite(Vec<Combinator<'a>>),
    /// Anything else: scalars, arrays, objects without a test or combinator.
    Unknown,
}

/// Mutable access to a leaf condition.
#[derive(Debug)]
pub struct LeafFilter<'a> {
    fields: &'a mut Map<String, Value>,
}

/// Children of a group, tagged by combinator.
#[derive(Debug)]
pub enum Combinator<'a> {
    /// Children under `any_of`.
    AnyOf(&'a mut Vec<Value>),
    /// Children under `all_of`.
    AllOf(&'a mut Vec<Value>),
}

impl<'a> FilterNode<'a> {
    /// Classifies `node`.
    ///
    /// A node matching the player triple is a leaf even if it also carries
    /// combinators; those stay reachable through
    /// [`LeafFilter::combinators_mut`]. Combinator keys only count when they
    /// hold an array.
    pub fn classify(node: &'a mut Value) -> Self {
        let Value::Object(fields) = node else {
            return Self::Unknown;
        };
        if targets_player(fields) {
            return Self::Leaf(LeafFilter { fields });
        }
        if fields.iter().any(|(key, value)| Combinator::accepts(key, value)) {
            return Self::Composite(combinators(fields));
        }
        if fields.contains_key("test") {
            Self::Leaf(LeafFilter { fields })
        } else {
            Self::Unknown
        }
    }
}

impl LeafFilter<'_> {
    /// Whether this leaf is exactly `is_family` / `other` / `player`.
    #[must_use]
    pub fn targets_player(&self) -> bool {
        targets_player(self.fields)
    }

    /// Retargets a player leaf at the `void` family. Other leaves are not
    /// touched.
    pub fn void_player(&mut self) -> bool {
        if !self.targets_player() {
            return false;
        }
        self.fields
            .insert("value".to_owned(), Value::from(VOID_FAMILY));
        true
    }

    /// Child groups carried alongside the condition, if any.
    pub fn combinators_mut(&mut self) -> Vec<Combinator<'_>> {
        combinators(self.fields)
    }
}

impl<'a> Combinator<'a> {
    fn accepts(key: &str, value: &Value) -> bool {
        (key == ANY_OF || key == ALL_OF) && value.is_array()
    }

    fn from_entry(key: &str, value: &'a mut Value) -> Option<Self> {
        match (key, value) {
            (ANY_OF, Value::Array(children)) => Some(Self::AnyOf(children)),
            (ALL_OF, Value::Array(children)) => Some(Self::AllOf(children)),
            _ => None,
        }
    }

    /// Child nodes, in document order.
    pub fn children_mut(&mut self) -> &mut [Value] {
        match self {
            Self::AnyOf(children) | Self::AllOf(children) => children.as_mut_slice(),
        }
    }
}

fn combinators(fields: &mut Map<String, Value>) -> Vec<Combinator<'_>> {
    fields
        .iter_mut()
        .filter_map(|(key, value)| Combinator::from_entry(key, value))
        .collect()
}

fn text<'m>(fields: &'m Map<String, Value>, key: &str) -> Option<&'m str> {
    fields.get(key).and_then(Value::as_str)
}

fn targets_player(fields: &Map<String, Value>) -> bool {
    text(fields, "test") == Some(PLAYER_TEST)
        && text(fields, "subject") == Some(PLAYER_SUBJECT)
        && text(fields, "value") == Some(PLAYER_FAMILY)
}

/// Rewrites every player leaf reachable from `node` to target `void`.
///
/// Every group is visited, including siblings and children of leaves that
/// already matched. Returns whether anything changed.
pub fn void_player_targets(node: &mut Value) -> bool {
    match FilterNode::classify(node) {
        FilterNode::Leaf(mut leaf) => {
            let modified = leaf.void_player();
            walk(leaf.combinators_mut()) || modified
        }
        FilterNode::Composite(combinators) => walk(combinators),
        FilterNode::Unknown => false,
    }
}

fn walk(combinators: Vec<Combinator<'_>>) -> bool {
    let mut modified = false;
    for mut combinator in combinators {
        for child in combinator.children_mut() {
            modified |= void_player_targets(child);
        }
    }
    modified
}
