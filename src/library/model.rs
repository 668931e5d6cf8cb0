use std::path::PathBuf;
use std::time::Duration;

/// One playable audio file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// Basename, truncated for display.
    pub display: String,
    /// Whole seconds; 0 when the tags could not be read.
    pub duration_secs: u64,
}

impl Track {
    /// Duration when it is known (non-zero).
    pub fn duration(&self) -> Option<Duration> {
        (self.duration_secs > 0).then(|| Duration::from_secs(self.duration_secs))
    }
}
