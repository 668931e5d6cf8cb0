use std::path::Path;

use crate::library::Track;

use super::error::PlayerError;

/// Ordered, path-unique list of tracks. Order is play and display order.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.position(path).is_some()
    }

    /// Append `track` unless its path is already listed. Returns whether it
    /// was added.
    pub fn push(&mut self, track: Track) -> bool {
        if self.contains(&track.path) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Relocate the entry at `from` so that it ends up at index `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), PlayerError> {
        self.check(from)?;
        self.check(to)?;
        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Track, PlayerError> {
        self.check(index)?;
        Ok(self.tracks.remove(index))
    }

    fn check(&self, index: usize) -> Result<(), PlayerError> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(PlayerError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            })
        }
    }
}
