//! Error types for each stage of the pipeline.
//!
//! Listing and output preparation failures abort the run. Everything else is
//! scoped to a single entity file and only skips that file.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to retrieve the entity index. Fatal.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The request never produced a response.
    #[error("failed to request the entity listing: {0}")]
    Request(#[source] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("Failed to fetch file list from GitHub. Status code: {}", .status.as_u16())]
    Status {
        /// Status returned by the server.
        status: StatusCode,
    },
    /// The body was not a sequence of file descriptors.
    #[error("entity listing is not a list of files: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Failure to download one entity file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response or its body could not be read.
    #[error("{0}")]
    Request(#[source] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("Status code: {}", .status.as_u16())]
    Status {
        /// Status returned by the server.
        status: StatusCode,
    },
}

/// Entity text that is not JSON even after comments are stripped.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ParseError(#[from] pub serde_json::Error);

/// Failures touching the output tree.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output directory could not be cleared or created. Fatal.
    #[error("cannot prepare output directory {}: {source}", .path.display())]
    Prepare {
        /// Directory being recreated.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },
    /// A modified document could not be saved.
    #[error("{source}")]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },
    /// The document could not be rendered back to text.
    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
    /// The listed name is not a bare file name.
    #[error("refusing to write outside the output directory: {name:?}")]
    InvalidName {
        /// Name as it appeared in the listing.
        name: String,
    },
}

/// Configuration that could not be assembled from its layers.
#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[source] pub Box<figment::Error>);

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The HTTP client could not be built.
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The entity index could not be retrieved.
    #[error(transparent)]
    Listing(#[from] ListingError),
    /// The output directory could not be recreated.
    #[error(transparent)]
    Output(#[from] OutputError),
    /// The console sink stopped accepting output.
    #[error("cannot write report: {0}")]
    Report(#[from] io::Error),
}
