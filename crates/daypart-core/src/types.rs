//! Domain types: time-of-day classes and track feature records.

use serde::{Deserialize, Serialize};

use crate::error::{DaypartError, Result};

/// Number of time-of-day classes the model predicts.
pub const CLASS_COUNT: usize = 5;

/// The five time-of-day classes, in the model's output index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Daypart {
    EarlyMorningLateNight,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Daypart {
    /// All classes in model output order (index 0..=4).
    pub const ALL: [Daypart; CLASS_COUNT] = [
        Daypart::EarlyMorningLateNight,
        Daypart::Morning,
        Daypart::Afternoon,
        Daypart::Evening,
        Daypart::Night,
    ];

    /// Human-readable label, exact output-order taxonomy of the model.
    pub fn label(&self) -> &'static str {
        match self {
            Daypart::EarlyMorningLateNight => "Early Morning/Late Night",
            Daypart::Morning => "Morning",
            Daypart::Afternoon => "Afternoon",
            Daypart::Evening => "Evening",
            Daypart::Night => "Night",
        }
    }

    /// Class for a model output index, or `None` past the last class.
    pub fn from_index(index: usize) -> Option<Daypart> {
        Self::ALL.get(index).copied()
    }

    /// Model output index of this class.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Daypart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A track-feature record as delivered by a catalog API, before validation.
///
/// Descriptors are optional because upstream payloads can omit them (local
/// tracks have no audio analysis). Fields the model does not use
/// (speechiness, acousticness, instrumentalness in typical payloads) are
/// ignored by serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTrackFeatures {
    #[serde(default)]
    pub id: String,
    pub danceability: Option<f32>,
    pub energy: Option<f32>,
    pub loudness: Option<f32>,
    pub liveness: Option<f32>,
    pub valence: Option<f32>,
    pub tempo: Option<f32>,
}

impl RawTrackFeatures {
    /// Validate into a [`TrackFeatures`] record.
    ///
    /// A missing or non-finite descriptor, or an empty id, is an
    /// `InvalidFeatureRecord` naming the offending field.
    pub fn validate(&self) -> Result<TrackFeatures> {
        if self.id.is_empty() {
            return Err(self.invalid("id"));
        }
        Ok(TrackFeatures {
            id: self.id.clone(),
            danceability: self.descriptor(self.danceability, "danceability")?,
            energy: self.descriptor(self.energy, "energy")?,
            loudness: self.descriptor(self.loudness, "loudness")?,
            liveness: self.descriptor(self.liveness, "liveness")?,
            valence: self.descriptor(self.valence, "valence")?,
            tempo: self.descriptor(self.tempo, "tempo")?,
        })
    }

    fn descriptor(&self, value: Option<f32>, field: &'static str) -> Result<f32> {
        match value {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(self.invalid(field)),
        }
    }

    fn invalid(&self, field: &'static str) -> DaypartError {
        DaypartError::InvalidFeatureRecord {
            track_id: self.id.clone(),
            field,
        }
    }
}

/// Validated per-track audio descriptors. Immutable once built.
///
/// Descriptor ranges (the model's training domains): danceability, energy,
/// liveness and valence in [0, 1]; loudness in [-60, 12] dB; tempo in
/// [40, 220] BPM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFeatures {
    pub id: String,
    pub danceability: f32,
    pub energy: f32,
    pub loudness: f32,
    pub liveness: f32,
    pub valence: f32,
    pub tempo: f32,
}

/// One entry of a ranked prediction: a class and its raw probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedClass {
    pub class: Daypart,
    pub probability: f32,
}
