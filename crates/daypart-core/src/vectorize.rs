//! Track feature vectorization.
//!
//! Converts a validated [`TrackFeatures`] record into the fixed-order,
//! fixed-length input vector the classifier expects, remapping each
//! descriptor from its training-data range into [-1, 1].

use crate::remap::remap;
use crate::types::TrackFeatures;

/// Number of descriptors in the model input vector.
pub const INPUT_DIM: usize = 6;

/// Lower bound of the model input domain.
pub const MODEL_MIN: f32 = -1.0;

/// Upper bound of the model input domain.
pub const MODEL_MAX: f32 = 1.0;

/// Source range per descriptor, in model input order:
/// danceability, energy, loudness, liveness, valence, tempo.
const FEATURE_RANGES: [(f32, f32); INPUT_DIM] = [
    (0.0, 1.0),    // danceability
    (0.0, 1.0),    // energy
    (-60.0, 12.0), // loudness (dB)
    (0.0, 1.0),    // liveness
    (0.0, 1.0),    // valence
    (40.0, 220.0), // tempo (BPM)
];

/// Build the model input vector for one track.
///
/// In-range descriptors land in [-1, 1]; out-of-range values pass through
/// the remap linearly and land outside it. The descriptor order here must
/// never change: it is the order the model was trained on.
pub fn vectorize(track: &TrackFeatures) -> [f32; INPUT_DIM] {
    let raw = [
        track.danceability,
        track.energy,
        track.loudness,
        track.liveness,
        track.valence,
        track.tempo,
    ];
    let mut input = [0.0f32; INPUT_DIM];
    for (i, (value, (lo, hi))) in raw.iter().zip(FEATURE_RANGES).enumerate() {
        input[i] = remap(*value, lo, hi, MODEL_MIN, MODEL_MAX);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(
        danceability: f32,
        energy: f32,
        loudness: f32,
        liveness: f32,
        valence: f32,
        tempo: f32,
    ) -> TrackFeatures {
        TrackFeatures {
            id: "test".to_string(),
            danceability,
            energy,
            loudness,
            liveness,
            valence,
            tempo,
        }
    }

    #[test]
    fn test_lower_corner_maps_to_all_minus_one() {
        let v = vectorize(&track(0.0, 0.0, -60.0, 0.0, 0.0, 40.0));
        assert_eq!(v, [-1.0; INPUT_DIM]);
    }

    #[test]
    fn test_upper_corner_maps_to_all_plus_one() {
        let v = vectorize(&track(1.0, 1.0, 12.0, 1.0, 1.0, 220.0));
        assert_eq!(v, [1.0; INPUT_DIM]);
    }

    #[test]
    fn test_midpoints_map_to_zero() {
        let v = vectorize(&track(0.5, 0.5, -24.0, 0.5, 0.5, 130.0));
        for (i, x) in v.iter().enumerate() {
            assert!(x.abs() < 1e-5, "dimension {} not centered: {}", i, x);
        }
    }

    #[test]
    fn test_in_range_track_stays_in_domain() {
        let v = vectorize(&track(0.7, 0.3, -8.5, 0.15, 0.92, 174.0));
        for x in v {
            assert!((MODEL_MIN..=MODEL_MAX).contains(&x));
        }
    }

    #[test]
    fn test_out_of_range_descriptor_passes_through() {
        // Loudness above the training ceiling extrapolates past +1 instead
        // of being clamped.
        let v = vectorize(&track(0.5, 0.5, 20.0, 0.5, 0.5, 130.0));
        assert!(v[2] > MODEL_MAX);
    }
}
