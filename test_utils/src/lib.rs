//! Utility helpers for tests.
//!
//! Builders for entity definition JSON and an in-memory [`EntitySource`].

use std::cell::RefCell;
use std::collections::HashMap;

use passive_mobs::{EntityFile, EntitySource, FetchError, ListingError};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Base URL used for files served by [`FakeSource`].
pub const FAKE_BASE_URL: &str = "https://raw.test/entities";

/// Assert that all strings in `keys` are present in `text`.
///
/// # Panics
/// Panics with a helpful message if any key is missing.
pub fn assert_all_present(text: &str, keys: &[&str]) {
    for key in keys {
        assert!(text.contains(key), "{} not found in output", key);
    }
}

/// Assert that all strings in `keys` are absent from `text`.
///
/// # Panics
/// Panics with a helpful message if any key is found.
pub fn assert_all_absent(text: &str, keys: &[&str]) {
    for key in keys {
        assert!(!text.contains(key), "{} should not be present", key);
    }
}

/// `{"test": "is_family", "subject": "other", "value": <family>}`.
#[must_use]
pub fn family_filter(family: &str) -> Value {
    json!({"test": "is_family", "subject": "other", "value": family})
}

/// A `nearest_attackable_target` component over the given entity types.
#[must_use]
pub fn targeting(entity_types: Value) -> Value {
    json!({
        "minecraft:behavior.nearest_attackable_target": {
            "priority": 2,
            "entity_types": entity_types
        }
    })
}

/// Builder for `minecraft:entity` documents.
#[derive(Clone, Debug)]
pub struct EntityJson {
    description: serde_json::Map<String, Value>,
    components: Value,
    component_groups: Option<Value>,
}

impl EntityJson {
    /// A spawnable monster called `identifier` with no components.
    #[must_use]
    pub fn monster(identifier: &str) -> Self {
        let mut description = serde_json::Map::new();
        description.insert("identifier".to_owned(), json!(identifier));
        description.insert("spawn_category".to_owned(), json!("monster"));
        description.insert("is_spawnable".to_owned(), json!(true));
        Self {
            description,
            components: json!({}),
            component_groups: None,
        }
    }

    /// Overrides a description field.
    #[must_use]
    pub fn with_description(mut self, key: &str, value: Value) -> Self {
        self.description.insert(key.to_owned(), value);
        self
    }

    /// Drops a description field.
    #[must_use]
    pub fn without_description(mut self, key: &str) -> Self {
        self.description.remove(key);
        self
    }

    /// Replaces the `components` object.
    #[must_use]
    pub fn with_components(mut self, components: Value) -> Self {
        self.components = components;
        self
    }

    /// Sets `component_groups`.
    #[must_use]
    pub fn with_groups(mut self, groups: Value) -> Self {
        self.component_groups = Some(groups);
        self
    }

    /// The document tree.
    #[must_use]
    pub fn build(self) -> Value {
        let mut entity = serde_json::Map::new();
        entity.insert("description".to_owned(), Value::Object(self.description));
        if let Some(groups) = self.component_groups {
            entity.insert("component_groups".to_owned(), groups);
        }
        entity.insert("components".to_owned(), self.components);
        json!({"format_version": "1.21.70", "minecraft:entity": entity})
    }

    /// The document as commented JSON, the way vanilla files are shipped.
    #[must_use]
    pub fn to_commented_text(self) -> String {
        format!(
            "// generated fixture\n{}",
            serde_json::to_string_pretty(&self.build()).unwrap_or_default()
        )
    }
}

/// In-memory [`EntitySource`] recording which URLs were fetched.
#[derive(Debug, Default)]
pub struct FakeSource {
    listing_status: Option<u16>,
    listing: Vec<EntityFile>,
    bodies: HashMap<String, Result<String, u16>>,
    fetched: RefCell<Vec<String>>,
}

impl FakeSource {
    /// Empty listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URL a file called `name` is served from.
    #[must_use]
    pub fn url_for(name: &str) -> String {
        format!("{FAKE_BASE_URL}/{name}")
    }

    /// Lists `name` and serves `text` for it.
    #[must_use]
    pub fn with_file(mut self, name: &str, text: impl Into<String>) -> Self {
        let url = Self::url_for(name);
        self.listing.push(EntityFile::new(name, url.clone()));
        self.bodies.insert(url, Ok(text.into()));
        self
    }

    /// Lists `name` but answers its download with `status`.
    #[must_use]
    pub fn with_failing_file(mut self, name: &str, status: u16) -> Self {
        let url = Self::url_for(name);
        self.listing.push(EntityFile::new(name, url.clone()));
        self.bodies.insert(url, Err(status));
        self
    }

    /// Lists an arbitrary entry without serving anything for it.
    #[must_use]
    pub fn with_entry(mut self, entry: EntityFile) -> Self {
        self.listing.push(entry);
        self
    }

    /// Answers the listing request with `status`.
    #[must_use]
    pub fn with_listing_status(mut self, status: u16) -> Self {
        self.listing_status = Some(status);
        self
    }

    /// URLs fetched so far, in order.
    #[must_use]
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl EntitySource for FakeSource {
    fn list_entity_files(&self) -> Result<Vec<EntityFile>, ListingError> {
        match self.listing_status {
            Some(code) => Err(ListingError::Status {
                status: status(code),
            }),
            None => Ok(self.listing.clone()),
        }
    }

    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.fetched.borrow_mut().push(url.to_owned());
        match self.bodies.get(url) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(code)) => Err(FetchError::Status {
                status: status(*code),
            }),
            None => Err(FetchError::Status {
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
