/// Where the player is in its lifecycle.
///
/// `Stopped -(load)-> Ready -(play)-> Playing <-(pause/play)-> Paused`, and
/// `stop` returns to `Stopped` from anywhere.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    /// A track is selected but has not been started.
    Ready,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Ready => "Ready",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }
}

/// Output volume in percent, always within `0..=100`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(100);

    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Apply a signed step, saturating at both ends.
    pub fn step(self, delta: i16) -> Self {
        let v = (i16::from(self.0) + delta).clamp(0, 100);
        Self(v as u8)
    }

    /// Gain handed to the mixer.
    pub fn gain(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn level(self) -> VolumeLevel {
        match self.0 {
            0 => VolumeLevel::Muted,
            1..=32 => VolumeLevel::Low,
            33..=65 => VolumeLevel::Medium,
            _ => VolumeLevel::High,
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

/// Icon state of the volume button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    Medium,
    High,
}

impl VolumeLevel {
    pub fn icon(self) -> &'static str {
        match self {
            VolumeLevel::Muted => "🔇",
            VolumeLevel::Low => "🔈",
            VolumeLevel::Medium => "🔉",
            VolumeLevel::High => "🔊",
        }
    }
}

/// Which transport controls can be used right now.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub play: bool,
    pub pause: bool,
    pub stop: bool,
    pub seek: bool,
}

impl Controls {
    pub fn none_enabled(self) -> bool {
        !(self.play || self.pause || self.stop || self.seek)
    }
}
