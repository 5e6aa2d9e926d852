//! Per-file outcomes and the console lines announcing them.

use std::fmt;
use std::io::{self, Write};

use log::debug;

use crate::error::{FetchError, OutputError, ParseError};
use crate::transform::Ineligibility;

/// Terminal state of one listed entity file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Player targeting was rewritten and the file saved.
    Modified {
        /// Entity identifier.
        identifier: String,
    },
    /// Eligible, but nothing targeted the player.
    Unmodified {
        /// Entity identifier.
        identifier: String,
    },
    /// Not a spawnable monster.
    Ineligible {
        /// Listed file name.
        name: String,
        /// Rule the entity failed.
        reason: Ineligibility,
    },
    /// Download failed.
    FetchFailed {
        /// Listed file name.
        name: String,
        /// Cause.
        error: FetchError,
    },
    /// Text was not JSON.
    ParseFailed {
        /// Listed file name.
        name: String,
        /// Cause.
        error: ParseError,
    },
    /// Eligible entity without an identifier.
    MissingIdentifier {
        /// Listed file name.
        name: String,
    },
    /// Modified, but saving failed.
    WriteFailed {
        /// Listed file name.
        name: String,
        /// Cause.
        error: OutputError,
    },
}

impl FileOutcome {
    /// Whether this outcome prints a console line.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        !matches!(self, Self::Ineligible { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modified { identifier } => write!(f, "Modified: {identifier}"),
            Self::Unmodified { identifier } => write!(f, "Unmodified: {identifier}"),
            Self::Ineligible { name, reason } => write!(f, "Skipped {name}: {reason}"),
            Self::FetchFailed { name, error } => write!(f, "Failed to fetch {name}. {error}"),
            Self::ParseFailed { name, error } => {
                write!(f, "Failed to decode JSON for {name}. Error: {error}")
            }
            Self::MissingIdentifier { name } => write!(f, "Identifier not found in {name}"),
            Self::WriteFailed { name, error } => {
                write!(f, "Failed to write {name} to disk. Error: {error}")
            }
        }
    }
}

/// Writes outcome lines to a sink, normally standard output.
pub struct ConsoleReport<W> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    /// Wraps `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints the outcome's line. Ineligible files only reach the debug log.
    ///
    /// # Errors
    /// Propagates failures of the underlying sink.
    pub fn record(&mut self, outcome: &FileOutcome) -> io::Result<()> {
        if outcome.is_reported() {
            writeln!(self.out, "{outcome}")
        } else {
            debug!("{outcome}");
            Ok(())
        }
    }
}

/// Counts of terminal states over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files rewritten and saved.
    pub modified: usize,
    /// Eligible files left as they were.
    pub unmodified: usize,
    /// Ineligible files and files without an identifier.
    pub skipped: usize,
    /// Fetch, parse and write failures.
    pub failed: usize,
}

impl RunSummary {
    /// Adds one outcome.
    pub fn tally(&mut self, outcome: &FileOutcome) {
        let counter = match outcome {
            FileOutcome::Modified { .. } => &mut self.modified,
            FileOutcome::Unmodified { .. } => &mut self.unmodified,
            FileOutcome::Ineligible { .. } | FileOutcome::MissingIdentifier { .. } => {
                &mut self.skipped
            }
            FileOutcome::FetchFailed { .. }
            | FileOutcome::ParseFailed { .. }
            | FileOutcome::WriteFailed { .. } => &mut self.failed,
        };
        *counter += 1;
    }

    /// Number of files that reached a terminal state.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.modified + self.unmodified + self.skipped + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} modified, {} unmodified, {} skipped, {} failed",
            self.modified, self.unmodified, self.skipped, self.failed
        )
    }
}
