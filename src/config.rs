//! Layered run configuration.
//!
//! Defaults reproduce the pinned behaviour of the tool. A `passive_mobs.toml`
//! file (or one named on the command line) and `PASSIVE_MOBS_*` environment
//! variables can override individual fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONTENT_REF, DEFAULT_TIMEOUT_SECS, DISPLAY_NAME, ENTITY_LISTING_URL, PROJECT_NAME, USER_AGENT,
};
use crate::error::ConfigError;

/// File consulted when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "passive_mobs.toml";
/// Prefix for environment overrides, e.g. `PASSIVE_MOBS_CONTENT_REF`.
pub const ENV_PREFIX: &str = "PASSIVE_MOBS_";

/// Settings for one run of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Contents API URL listing the entity files, without the ref query.
    pub listing_url: String,
    /// Tag or branch the listing is pinned to.
    pub content_ref: String,
    /// Directory that receives rewritten entity files. Cleared on every run.
    pub output_dir: PathBuf,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            listing_url: ENTITY_LISTING_URL.to_owned(),
            content_ref: CONTENT_REF.to_owned(),
            output_dir: default_output_dir(),
            user_agent: USER_AGENT.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `./build/<project>/<display name>/entities`.
#[must_use]
pub fn default_output_dir() -> PathBuf {
    [".", "build", PROJECT_NAME, DISPLAY_NAME, "entities"]
        .iter()
        .collect()
}

impl PipelineConfig {
    /// Builds the provider stack: defaults, then the TOML file, then the
    /// environment.
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration from all layers.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a layer holds a value of the wrong type.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment(config_file).extract()?)
    }

    /// Listing URL pinned to [`Self::content_ref`].
    #[must_use]
    pub fn index_url(&self) -> String {
        format!("{}?ref={}", self.listing_url, self.content_ref)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
