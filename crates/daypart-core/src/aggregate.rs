//! Playlist-level aggregation of per-track class distributions.

use serde::{Deserialize, Serialize};

use crate::error::{DaypartError, Result};
use crate::types::{Daypart, CLASS_COUNT};

/// The playlist-level outcome: per-class average probability and the best
/// overall class. Computed once per analysis, never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistVerdict {
    /// Arithmetic mean of each class probability across the aggregated
    /// tracks, in class index order.
    pub average: [f32; CLASS_COUNT],
    /// Class with the highest average probability; ties resolve to the
    /// lowest class index.
    pub best: Daypart,
}

/// Average full per-track distributions into a single verdict.
///
/// Every entry must be a full distribution in class index order — never a
/// top-k subset, which would silently treat unranked classes as absent
/// rather than zero. Tracks that failed prediction are excluded by the
/// caller before this point, so the divisor is the number of distributions
/// actually given.
///
/// # Errors
///
/// `EmptyPlaylist` when there is nothing to average.
pub fn aggregate(distributions: &[[f32; CLASS_COUNT]]) -> Result<PlaylistVerdict> {
    if distributions.is_empty() {
        return Err(DaypartError::EmptyPlaylist);
    }

    let mut average = [0.0f32; CLASS_COUNT];
    for dist in distributions {
        for (sum, p) in average.iter_mut().zip(dist) {
            *sum += p;
        }
    }
    let count = distributions.len() as f32;
    for sum in &mut average {
        *sum /= count;
    }

    // Strict greater-than keeps the lowest index on ties.
    let mut best = 0;
    for (i, p) in average.iter().enumerate() {
        if *p > average[best] {
            best = i;
        }
    }
    Ok(PlaylistVerdict {
        average,
        best: Daypart::ALL[best],
    })
}
