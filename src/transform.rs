//! Eligibility checks and the targeting rewrite for one entity document.

use std::fmt;

use serde_json::{Map, Value};

use crate::constants::MONSTER_CATEGORY;
use crate::document::{Description, EntityDocument};
use crate::filter::void_player_targets;

/// Why a document was left out before any rewrite was attempted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ineligibility {
    /// `spawn_category` is absent or not `monster`.
    NotMonster {
        /// Category found in the description, if it was a string.
        category: Option<String>,
    },
    /// `is_spawnable` is not `true`.
    NotSpawnable,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMonster { category: Some(category) } => {
                write!(f, "spawn category {category:?} is not {MONSTER_CATEGORY}")
            }
            Self::NotMonster { category: None } => write!(f, "no spawn category"),
            Self::NotSpawnable => write!(f, "not spawnable"),
        }
    }
}

/// Outcome of running the transformer over one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Not a spawnable monster; untouched.
    Ineligible(Ineligibility),
    /// Eligible but without an identifier; never written.
    MissingIdentifier,
    /// Eligible and walked.
    Processed {
        /// Entity identifier from the description.
        identifier: String,
        /// Whether at least one player filter was rewritten.
        modified: bool,
    },
}

impl Verdict {
    /// Whether the document should be written out.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        matches!(self, Self::Processed { modified: true, .. })
    }
}

/// Checks the spawn rules. `monster` is compared ignoring ASCII case.
///
/// # Errors
/// Returns the first rule the description breaks.
pub fn eligibility(description: &Description<'_>) -> Result<(), Ineligibility> {
    match description.spawn_category() {
        Some(category) if category.eq_ignore_ascii_case(MONSTER_CATEGORY) => {}
        category => {
            return Err(Ineligibility::NotMonster {
                category: category.map(str::to_owned),
            })
        }
    }
    if description.is_spawnable() {
        Ok(())
    } else {
        Err(Ineligibility::NotSpawnable)
    }
}

/// Filters the document and, if eligible, rewrites its player targeting in
/// place.
pub fn transform_document(doc: &mut EntityDocument) -> Verdict {
    let description = doc.description();
    if let Err(reason) = eligibility(&description) {
        return Verdict::Ineligible(reason);
    }
    let Some(identifier) = description.identifier().map(str::to_owned) else {
        return Verdict::MissingIdentifier;
    };

    let modified = void_player_targeting(doc);
    Verdict::Processed {
        identifier,
        modified,
    }
}

/// Rewrites the filters of every entity type of every targeting component.
pub fn void_player_targeting(doc: &mut EntityDocument) -> bool {
    let mut modified = false;
    for component in doc.targeting_components_mut() {
        for entity_type in entity_types_mut(component) {
            if let Some(filters) = entity_type.get_mut("filters") {
                modified |= void_player_targets(filters);
            }
        }
    }
    modified
}

/// `entity_types` as a sequence: a lone object is treated as a one element
/// list, anything else as empty.
fn entity_types_mut(component: &mut Map<String, Value>) -> &mut [Value] {
    match component.get_mut("entity_types") {
        Some(Value::Array(entries)) => entries.as_mut_slice(),
        Some(single) if single.is_object() => std::slice::from_mut(single),
        _ => &mut [],
    }
}
