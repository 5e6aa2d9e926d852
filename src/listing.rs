//! Entity index entries as returned by the GitHub contents API.

use serde::Deserialize;

use crate::constants::ENTITY_FILE_EXTENSION;

/// One entry of the contents listing.
///
/// The API returns many more fields; only these two are read. Directories and
/// submodules carry a `null` download URL.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EntityFile {
    /// File name, also used as the output file name.
    #[serde(default)]
    pub name: String,
    /// Raw content URL.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl EntityFile {
    /// Convenience constructor for a downloadable file.
    #[must_use]
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: Some(download_url.into()),
        }
    }

    /// Whether the name carries the entity definition extension.
    #[must_use]
    pub fn is_entity_definition(&self) -> bool {
        self.name.ends_with(ENTITY_FILE_EXTENSION)
    }
}

/// A listing entry that can be downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Downloadable<'a> {
    /// File name from the listing.
    pub name: &'a str,
    /// URL the raw text is fetched from.
    pub url: &'a str,
}

/// Keeps JSON entries with a download URL, in listing order.
pub fn select_entity_files(listing: &[EntityFile]) -> impl Iterator<Item = Downloadable<'_>> {
    listing
        .iter()
        .filter(|file| file.is_entity_definition())
        .filter_map(|file| {
            let url = file.download_url.as_deref().filter(|url| !url.is_empty())?;
            Some(Downloadable {
                name: &file.name,
                url,
            })
        })
}
