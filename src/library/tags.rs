use std::path::{Path, PathBuf};

use lofty::file::AudioFile;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to read tags from {}: {reason}", path.display())]
pub struct TagError {
    pub path: PathBuf,
    pub reason: String,
}

/// Source of track durations.
pub trait TagReader {
    /// Duration of the file at `path`, in whole seconds.
    fn duration_secs(&self, path: &Path) -> Result<u64, TagError>;
}

/// Reads durations with `lofty` from the file's stream properties.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn duration_secs(&self, path: &Path) -> Result<u64, TagError> {
        let tagged = lofty::read_from_path(path).map_err(|e| TagError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(tagged.properties().duration().as_secs())
    }
}
