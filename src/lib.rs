//! Rewrites vanilla Bedrock monster definitions so they stop targeting
//! players.
//!
//! Entity files are listed from a pinned tag of `Mojang/bedrock-samples`,
//! downloaded one at a time, and every `nearest_attackable_target` filter
//! matching `is_family` / `other` / `player` is retargeted at the `void`
//! family. Files that changed are saved into a freshly recreated behaviour
//! pack directory.
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod filter;
pub mod listing;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod transform;

pub use config::PipelineConfig;
pub use document::{parse_document, EntityDocument};
pub use error::{ConfigError, FetchError, ListingError, OutputError, ParseError, PipelineError};
pub use filter::{void_player_targets, FilterNode};
pub use listing::EntityFile;
pub use logging::init as init_logging;
pub use output::OutputDir;
pub use pipeline::{run, run_with};
pub use report::{FileOutcome, RunSummary};
pub use source::{EntitySource, HttpEntitySource};
pub use transform::{transform_document, Verdict};
