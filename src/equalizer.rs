//! Ten-band equalizer settings and presets.
//!
//! The equalizer is cosmetic: gains never reach the audio spectrum. They are
//! folded into three coarse channel levels (bass, mid, treble) that the mixer
//! keeps for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::audio::ChannelLevels;

pub const MIN_GAIN_DB: i8 = -12;
pub const MAX_GAIN_DB: i8 = 12;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    Hz60,
    Hz170,
    Hz310,
    Hz600,
    Khz1,
    Khz3,
    Khz6,
    Khz12,
    Khz14,
    Khz16,
}

impl Band {
    pub const ALL: [Band; 10] = [
        Band::Hz60,
        Band::Hz170,
        Band::Hz310,
        Band::Hz600,
        Band::Khz1,
        Band::Khz3,
        Band::Khz6,
        Band::Khz12,
        Band::Khz14,
        Band::Khz16,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Band::Hz60 => "60Hz",
            Band::Hz170 => "170Hz",
            Band::Hz310 => "310Hz",
            Band::Hz600 => "600Hz",
            Band::Khz1 => "1kHz",
            Band::Khz3 => "3kHz",
            Band::Khz6 => "6kHz",
            Band::Khz12 => "12kHz",
            Band::Khz14 => "14kHz",
            Band::Khz16 => "16kHz",
        }
    }

    pub fn from_label(label: &str) -> Option<Band> {
        Band::ALL.into_iter().find(|b| b.label() == label)
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Next band to the right, wrapping.
    pub fn next(self) -> Band {
        Band::ALL[(self.index() + 1) % Band::ALL.len()]
    }

    /// Next band to the left, wrapping.
    pub fn prev(self) -> Band {
        Band::ALL[(self.index() + Band::ALL.len() - 1) % Band::ALL.len()]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Preset {
    Flat,
    Rock,
    Pop,
    Jazz,
    Classical,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Flat,
        Preset::Rock,
        Preset::Pop,
        Preset::Jazz,
        Preset::Classical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Flat => "flat",
            Preset::Rock => "rock",
            Preset::Pop => "pop",
            Preset::Jazz => "jazz",
            Preset::Classical => "classical",
        }
    }

    /// Gains in band order, 60Hz first.
    pub fn gains(self) -> [i8; 10] {
        match self {
            Preset::Flat => [0; 10],
            Preset::Rock => [4, 3, -2, -3, 2, 4, 3, 4, 4, 4],
            Preset::Pop => [-1, -1, 0, 2, 3, 2, 1, 1, 2, 2],
            Preset::Jazz => [2, 1, 1, 2, -1, -1, 0, 1, 2, 3],
            Preset::Classical => [3, 2, 1, 0, 0, 0, -1, -1, -2, -2],
        }
    }
}

/// Gain per band in dB, always within `MIN_GAIN_DB..=MAX_GAIN_DB`.
///
/// Persisted as an object keyed by band label (`{"60Hz": 4, ...}`); unknown
/// labels are ignored and missing ones read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i8>", into = "BTreeMap<String, i8>")]
pub struct EqualizerSettings {
    gains: [i8; 10],
}

impl EqualizerSettings {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            gains: preset.gains(),
        }
    }

    pub fn gain(&self, band: Band) -> i8 {
        self.gains[band.index()]
    }

    /// Set a band, clamping to the allowed range. Returns the stored value.
    pub fn set_gain(&mut self, band: Band, db: i8) -> i8 {
        let db = db.clamp(MIN_GAIN_DB, MAX_GAIN_DB);
        self.gains[band.index()] = db;
        db
    }

    pub fn adjust(&mut self, band: Band, delta: i8) -> i8 {
        self.set_gain(band, self.gain(band).saturating_add(delta))
    }

    /// The preset these gains match exactly, if any.
    pub fn matching_preset(&self) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.gains() == self.gains)
    }

    /// Fold the ten bands into bass (60-170Hz), mid (310Hz-3kHz) and treble
    /// (6-16kHz), each mapped from -12..12 dB onto 0.0..1.0.
    pub fn channel_levels(&self) -> ChannelLevels {
        let avg = |bands: &[Band]| -> f32 {
            let sum: f32 = bands.iter().map(|b| f32::from(self.gain(*b))).sum();
            sum / bands.len() as f32
        };
        let level = |db: f32| ((db + 12.0) / 24.0).clamp(0.0, 1.0);

        ChannelLevels {
            bass: level(avg(&[Band::Hz60, Band::Hz170])),
            mid: level(avg(&[Band::Hz310, Band::Hz600, Band::Khz1, Band::Khz3])),
            treble: level(avg(&[Band::Khz6, Band::Khz12, Band::Khz14, Band::Khz16])),
        }
    }
}

impl From<BTreeMap<String, i8>> for EqualizerSettings {
    fn from(map: BTreeMap<String, i8>) -> Self {
        let mut settings = EqualizerSettings::default();
        for (label, db) in map {
            if let Some(band) = Band::from_label(&label) {
                settings.set_gain(band, db);
            }
        }
        settings
    }
}

impl From<EqualizerSettings> for BTreeMap<String, i8> {
    fn from(settings: EqualizerSettings) -> Self {
        Band::ALL
            .into_iter()
            .map(|b| (b.label().to_string(), settings.gain(b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_gain_clamps_to_twelve_db() {
        let mut eq = EqualizerSettings::default();
        assert_eq!(eq.set_gain(Band::Hz60, 40), 12);
        assert_eq!(eq.set_gain(Band::Khz16, -40), -12);
        assert_eq!(eq.adjust(Band::Hz60, 1), 12);
        assert_eq!(eq.adjust(Band::Khz16, -1), -12);
    }

    #[test]
    fn presets_match_their_table() {
        let eq = EqualizerSettings::from_preset(Preset::Rock);
        assert_eq!(eq.gain(Band::Hz60), 4);
        assert_eq!(eq.gain(Band::Hz600), -3);
        assert_eq!(eq.gain(Band::Khz16), 4);
        assert_eq!(eq.matching_preset(), Some(Preset::Rock));

        let mut eq = eq;
        eq.adjust(Band::Khz1, 1);
        assert_eq!(eq.matching_preset(), None);
        assert_eq!(EqualizerSettings::from_preset(Preset::Flat), EqualizerSettings::default());
    }

    #[test]
    fn flat_maps_to_half_level_everywhere() {
        let levels = EqualizerSettings::default().channel_levels();
        assert_eq!(levels, ChannelLevels::default());
    }

    #[test]
    fn channel_levels_average_their_bands() {
        let mut eq = EqualizerSettings::default();
        eq.set_gain(Band::Hz60, 12);
        eq.set_gain(Band::Hz170, 12);
        for b in [Band::Khz6, Band::Khz12, Band::Khz14, Band::Khz16] {
            eq.set_gain(b, -12);
        }
        let levels = eq.channel_levels();
        assert_eq!(levels.bass, 1.0);
        assert_eq!(levels.mid, 0.5);
        assert_eq!(levels.treble, 0.0);
    }

    #[test]
    fn serializes_as_label_map_and_ignores_unknown_labels() {
        let eq = EqualizerSettings::from_preset(Preset::Jazz);
        let json = serde_json::to_value(&eq).unwrap();
        assert_eq!(json["16kHz"], 3);
        assert_eq!(json["1kHz"], -1);

        let parsed: EqualizerSettings =
            serde_json::from_str(r#"{"60Hz": 30, "bogus": 5}"#).unwrap();
        assert_eq!(parsed.gain(Band::Hz60), 12);
        assert_eq!(parsed.gain(Band::Hz170), 0);
    }

    #[test]
    fn band_navigation_wraps() {
        assert_eq!(Band::Khz16.next(), Band::Hz60);
        assert_eq!(Band::Hz60.prev(), Band::Khz16);
        assert_eq!(Band::from_label("3kHz"), Some(Band::Khz3));
    }
}
