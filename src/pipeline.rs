//! The fetch, rewrite and save loop.
//!
//! The listing is retrieved once, then the output directory is recreated and
//! each listed file goes through fetch, parse, transform and (if modified)
//! write. A failure for one file never stops the others.

use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::config::PipelineConfig;
use crate::document::parse_document;
use crate::error::PipelineError;
use crate::listing::{select_entity_files, Downloadable};
use crate::output::OutputDir;
use crate::report::{ConsoleReport, FileOutcome, RunSummary};
use crate::source::{EntitySource, HttpEntitySource};
use crate::transform::{transform_document, Verdict};

/// Runs against the GitHub contents API described by `config`, printing
/// outcome lines to `out`.
///
/// # Errors
/// Fails only when the client cannot be built, the listing cannot be
/// retrieved, the output directory cannot be recreated, or `out` rejects a
/// line.
pub fn run<W: Write>(config: &PipelineConfig, out: W) -> Result<RunSummary, PipelineError> {
    let source = HttpEntitySource::new(config).map_err(PipelineError::Client)?;
    run_with(&source, &config.output_dir, out)
}

/// Runs against any [`EntitySource`].
///
/// # Errors
/// See [`run`].
pub fn run_with<S, W>(source: &S, output_dir: &Path, out: W) -> Result<RunSummary, PipelineError>
where
    S: EntitySource + ?Sized,
    W: Write,
{
    let listing = source.list_entity_files()?;
    info!("Listing holds {} entries", listing.len());

    let output = OutputDir::recreate(output_dir)?;
    let mut report = ConsoleReport::new(out);
    let mut summary = RunSummary::default();

    for file in select_entity_files(&listing) {
        let outcome = process_file(source, &output, &file);
        report.record(&outcome)?;
        summary.tally(&outcome);
    }

    info!("Finished: {summary}");
    Ok(summary)
}

/// Takes one listed file to its terminal state.
#[must_use]
pub fn process_file<S>(source: &S, output: &OutputDir, file: &Downloadable<'_>) -> FileOutcome
where
    S: EntitySource + ?Sized,
{
    let name = file.name.to_owned();
    let raw = match source.fetch_text(file.url) {
        Ok(raw) => raw,
        Err(error) => return FileOutcome::FetchFailed { name, error },
    };
    let mut doc = match parse_document(&raw) {
        Ok(doc) => doc,
        Err(error) => return FileOutcome::ParseFailed { name, error },
    };

    match transform_document(&mut doc) {
        Verdict::Ineligible(reason) => FileOutcome::Ineligible { name, reason },
        Verdict::MissingIdentifier => FileOutcome::MissingIdentifier { name },
        Verdict::Processed {
            identifier,
            modified: false,
        } => FileOutcome::Unmodified { identifier },
        Verdict::Processed {
            identifier,
            modified: true,
        } => match output.write_document(&name, &doc) {
            Ok(path) => {
                debug!("Wrote {}", path.display());
                FileOutcome::Modified { identifier }
            }
            Err(error) => FileOutcome::WriteFailed { name, error },
        },
    }
}
