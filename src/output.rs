//! The output tree receiving rewritten entity files.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::debug;

use crate::document::EntityDocument;
use crate::error::OutputError;

/// Directory that rewritten documents are saved into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Deletes `path` with everything in it and creates it again, empty.
    ///
    /// # Errors
    /// Returns [`OutputError::Prepare`] if either step fails.
    pub fn recreate(path: impl Into<PathBuf>) -> Result<Self, OutputError> {
        let path = path.into();
        clear(&path)
            .and_then(|()| fs::create_dir_all(&path))
            .map_err(|source| OutputError::Prepare {
                path: path.clone(),
                source,
            })?;
        debug!("Recreated output directory {}", path.display());
        Ok(Self { path })
    }

    /// Location on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves `doc` as `<dir>/<name>`, replacing any existing file.
    ///
    /// # Errors
    /// Fails if `name` is not a bare file name, or if serialising or writing
    /// fails. The directory is left as it was apart from the one file.
    pub fn write_document(
        &self,
        name: &str,
        doc: &EntityDocument,
    ) -> Result<PathBuf, OutputError> {
        let target = self.target(name)?;
        let text = doc.to_pretty_json()?;
        fs::write(&target, text).map_err(|source| OutputError::Write {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }

    fn target(&self, name: &str) -> Result<PathBuf, OutputError> {
        let file_name = Path::new(name)
            .file_name()
            .filter(|file_name| *file_name == name)
            .ok_or_else(|| OutputError::InvalidName {
                name: name.to_owned(),
            })?;
        Ok(self.path.join(file_name))
    }
}

fn clear(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
