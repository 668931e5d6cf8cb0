use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info};

use super::sink::create_sink_at;
use super::types::{ChannelLevels, MixerEngine, MixerError};

/// `MixerEngine` on top of the default `rodio` output stream.
///
/// Rodio mixes on its own thread; this type only drives one `Sink` at a time.
/// Seeking rebuilds the sink with the file skipped to the new offset, so the
/// reported position is that offset plus what the sink has played since.
pub struct RodioMixer {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    loaded: Option<PathBuf>,
    offset: Duration,
    volume: f32,
    levels: ChannelLevels,
}

impl RodioMixer {
    pub fn new() -> Self {
        Self {
            stream: None,
            sink: None,
            loaded: None,
            offset: Duration::ZERO,
            volume: 1.0,
            levels: ChannelLevels::default(),
        }
    }

    fn stream(&self) -> Result<&OutputStream, MixerError> {
        self.stream.as_ref().ok_or(MixerError::NotInitialized)
    }

    fn drop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.offset = Duration::ZERO;
    }
}

impl Default for RodioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl MixerEngine for RodioMixer {
    fn init(&mut self) -> Result<(), MixerError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MixerError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        self.stream = Some(stream);
        info!("audio output opened");
        Ok(())
    }

    fn quit(&mut self) {
        self.unload();
        if self.stream.take().is_some() {
            debug!("audio output closed");
        }
    }

    fn is_initialized(&self) -> bool {
        self.stream.is_some()
    }

    fn load(&mut self, path: &Path) -> Result<(), MixerError> {
        self.drop_sink();
        // Decoding up front surfaces unreadable files at load time.
        let sink = create_sink_at(self.stream()?, path, Duration::ZERO)?;
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        self.loaded = Some(path.to_path_buf());
        debug!(path = %path.display(), "loaded");
        Ok(())
    }

    fn unload(&mut self) {
        self.drop_sink();
        self.loaded = None;
    }

    fn play(&mut self, start: Duration) -> Result<(), MixerError> {
        let path = self.loaded.clone().ok_or(MixerError::NothingLoaded)?;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let sink = create_sink_at(self.stream()?, &path, start)?;
        sink.set_volume(self.volume);
        sink.play();
        self.sink = Some(sink);
        self.offset = start;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn stop(&mut self) {
        self.drop_sink();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    fn set_channel_levels(&mut self, levels: ChannelLevels) {
        // A single music channel has no spectral control; the levels are kept
        // so they can be reported, not applied.
        debug!(?levels, "channel levels updated");
        self.levels = levels;
    }

    fn channel_levels(&self) -> ChannelLevels {
        self.levels
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map_or(Duration::ZERO, |s| self.offset + s.get_pos())
    }

    fn is_busy(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|s| !s.empty() && !s.is_paused())
    }
}
