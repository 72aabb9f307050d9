//! Batch prediction across a playlist.
//!
//! Tracks are processed strictly in input order, one inference at a time,
//! because the playlist verdict depends on positional alignment between the
//! input sequence and the per-track output. A single bad track is recorded
//! as a failed entry and skipped; it never aborts the rest of the batch.

use daypart_core::{
    aggregate, top_k, vectorize, Daypart, PlaylistVerdict, RankedClass, RawTrackFeatures,
    CLASS_COUNT,
};

use crate::engine::{Classifier, TrackClassifier};
use crate::error::{ClassifyError, Result};

/// Prediction for one track position.
#[derive(Debug)]
pub struct TrackPrediction {
    /// Position in the input sequence. Aggregation aligns by position, not
    /// track id, so this is preserved even for failed entries.
    pub position: usize,
    pub track_id: String,
    /// The prediction, or why this track was skipped.
    pub outcome: Result<TrackClasses>,
}

/// Successful per-track prediction.
#[derive(Debug, Clone)]
pub struct TrackClasses {
    /// Full 5-class distribution in class index order, straight from the
    /// engine. This is what aggregation averages — never a reconstructed
    /// top-k subset, which would drop classes when k < 5.
    pub distribution: [f32; CLASS_COUNT],
    /// Top-k view of the same distribution, probability descending.
    pub ranked: Vec<RankedClass>,
}

/// Playlist-level analysis result.
#[derive(Debug)]
pub struct PlaylistAnalysis {
    /// One entry per input track, in input order, failures included.
    pub per_track: Vec<TrackPrediction>,
    /// Aggregated verdict over the tracks that predicted successfully.
    pub verdict: PlaylistVerdict,
    /// Number of tracks excluded from the verdict.
    pub skipped: usize,
}

/// Run validation, vectorization, inference, and ranking for every track.
///
/// Output length always equals input length and entry `i` always describes
/// input track `i`. `k` applies to the ranked view only; the full
/// distribution is kept regardless.
///
/// # Errors
///
/// `InvalidK` if `k` exceeds the class count. Per-track failures land in
/// the entries, not here.
pub fn predict_tracks<C: TrackClassifier>(
    classifier: &C,
    tracks: &[RawTrackFeatures],
    k: usize,
) -> Result<Vec<TrackPrediction>> {
    if k > CLASS_COUNT {
        return Err(daypart_core::DaypartError::InvalidK {
            k,
            classes: CLASS_COUNT,
        }
        .into());
    }

    let mut predictions = Vec::with_capacity(tracks.len());
    for (position, raw) in tracks.iter().enumerate() {
        let outcome = predict_one(classifier, raw, k);
        if let Err(e) = &outcome {
            log::warn!("skipping track {:?} at position {}: {}", raw.id, position, e);
        }
        predictions.push(TrackPrediction {
            position,
            track_id: raw.id.clone(),
            outcome,
        });
    }
    Ok(predictions)
}

fn predict_one<C: TrackClassifier>(
    classifier: &C,
    raw: &RawTrackFeatures,
    k: usize,
) -> Result<TrackClasses> {
    let track = raw.validate()?;
    let input = vectorize(&track);
    let distribution = classifier.predict(&input)?;
    let ranked = top_k(&distribution, k)?
        .into_iter()
        .filter_map(|(index, probability)| {
            Daypart::from_index(index).map(|class| RankedClass { class, probability })
        })
        .collect();
    Ok(TrackClasses {
        distribution,
        ranked,
    })
}

/// Predict every track with the given engine and aggregate the survivors.
pub fn analyze_with<C: TrackClassifier>(
    classifier: &C,
    tracks: &[RawTrackFeatures],
    k: usize,
) -> Result<PlaylistAnalysis> {
    if tracks.is_empty() {
        return Err(daypart_core::DaypartError::EmptyPlaylist.into());
    }

    let per_track = predict_tracks(classifier, tracks, k)?;

    let distributions: Vec<[f32; CLASS_COUNT]> = per_track
        .iter()
        .filter_map(|t| t.outcome.as_ref().ok().map(|c| c.distribution))
        .collect();
    if distributions.is_empty() {
        return Err(ClassifyError::NoUsableTracks {
            tracks: tracks.len(),
        });
    }

    let skipped = per_track.len() - distributions.len();
    if skipped > 0 {
        log::warn!(
            "verdict based on {} of {} tracks ({} skipped)",
            distributions.len(),
            per_track.len(),
            skipped
        );
    }

    let verdict = aggregate(&distributions)?;
    log::debug!("playlist verdict: {}", verdict.best);

    Ok(PlaylistAnalysis {
        per_track,
        verdict,
        skipped,
    })
}

impl Classifier {
    /// Classify a whole playlist.
    ///
    /// Loads the model once before the first track (awaiting any in-flight
    /// load), then runs each track through the pipeline sequentially.
    ///
    /// # Errors
    ///
    /// `EmptyPlaylist` for zero input tracks, `NoUsableTracks` when every
    /// track fails validation or inference, `ModelLoad` when the classifier
    /// asset cannot be loaded. Individual bad tracks are reported inside
    /// [`PlaylistAnalysis::per_track`] instead.
    pub async fn classify_playlist(
        &self,
        tracks: &[RawTrackFeatures],
        k: usize,
    ) -> Result<PlaylistAnalysis> {
        if tracks.is_empty() {
            return Err(daypart_core::DaypartError::EmptyPlaylist.into());
        }
        let engine = self.engine().await?;
        analyze_with(engine, tracks, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daypart_core::DaypartError;

    /// Distribution shaped by danceability so tests can tell tracks apart:
    /// class 0 gets the remapped danceability, the rest a fixed ramp.
    struct StubClassifier;

    impl TrackClassifier for StubClassifier {
        fn predict(&self, input: &[f32]) -> Result<[f32; CLASS_COUNT]> {
            crate::engine::check_input_shape(input.len())?;
            Ok([input[0], 0.1, 0.2, 0.3, 0.15])
        }
    }

    /// Engine that always fails, to exercise the skip policy.
    struct BrokenClassifier;

    impl TrackClassifier for BrokenClassifier {
        fn predict(&self, _input: &[f32]) -> Result<[f32; CLASS_COUNT]> {
            Err(ClassifyError::Inference("stub failure".to_string()))
        }
    }

    fn raw_track(id: &str, danceability: f32) -> RawTrackFeatures {
        RawTrackFeatures {
            id: id.to_string(),
            danceability: Some(danceability),
            energy: Some(0.5),
            loudness: Some(-10.0),
            liveness: Some(0.1),
            valence: Some(0.5),
            tempo: Some(120.0),
        }
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let tracks = vec![
            raw_track("a", 0.1),
            raw_track("b", 0.9),
            raw_track("c", 0.4),
        ];
        let predictions = predict_tracks(&StubClassifier, &tracks, 5).unwrap();
        assert_eq!(predictions.len(), 3);
        for (i, (p, id)) in predictions.iter().zip(["a", "b", "c"]).enumerate() {
            assert_eq!(p.position, i);
            assert_eq!(p.track_id, id);
            assert!(p.outcome.is_ok());
        }
    }

    #[test]
    fn test_bad_track_is_marked_not_fatal() {
        let mut bad = raw_track("bad", 0.5);
        bad.tempo = None;
        let tracks = vec![raw_track("a", 0.1), bad, raw_track("c", 0.4)];

        let predictions = predict_tracks(&StubClassifier, &tracks, 5).unwrap();
        assert_eq!(predictions.len(), 3, "failed track keeps its slot");
        assert!(predictions[0].outcome.is_ok());
        assert!(predictions[1].outcome.is_err());
        assert_eq!(predictions[1].position, 1);
        assert!(predictions[2].outcome.is_ok());
    }

    #[test]
    fn test_ranked_view_is_top_k() {
        let tracks = vec![raw_track("a", 1.0)]; // class 0 prob remaps to 1.0
        let predictions = predict_tracks(&StubClassifier, &tracks, 2).unwrap();
        let classes = predictions[0].outcome.as_ref().unwrap();
        assert_eq!(classes.ranked.len(), 2);
        assert_eq!(classes.ranked[0].class, Daypart::EarlyMorningLateNight);
        assert_eq!(classes.ranked[1].class, Daypart::Evening);
        // The full distribution stays intact alongside the ranked view.
        assert_eq!(classes.distribution[3], 0.3);
    }

    #[test]
    fn test_invalid_k_rejected_up_front() {
        let err = predict_tracks(&StubClassifier, &[raw_track("a", 0.5)], 6).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::Core(DaypartError::InvalidK { k: 6, classes: 5 })
        ));
    }

    #[test]
    fn test_analyze_skips_failed_tracks_in_verdict() {
        let mut bad = raw_track("bad", 0.5);
        bad.energy = None;
        // Good tracks: danceability 0.5 remaps to 0.0, so class 3 (0.3) wins.
        let tracks = vec![raw_track("a", 0.5), bad, raw_track("c", 0.5)];

        let analysis = analyze_with(&StubClassifier, &tracks, 5).unwrap();
        assert_eq!(analysis.per_track.len(), 3);
        assert_eq!(analysis.skipped, 1);
        assert_eq!(analysis.verdict.best, Daypart::Evening);
        // Mean over the two surviving tracks only.
        assert!((analysis.verdict.average[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_analyze_empty_playlist() {
        let err = analyze_with(&StubClassifier, &[], 5).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::Core(DaypartError::EmptyPlaylist)
        ));
    }

    #[test]
    fn test_analyze_all_tracks_unusable() {
        let mut bad1 = raw_track("x", 0.5);
        bad1.valence = None;
        let mut bad2 = raw_track("y", 0.5);
        bad2.loudness = Some(f32::INFINITY);

        let err = analyze_with(&StubClassifier, &[bad1, bad2], 5).unwrap_err();
        assert!(matches!(err, ClassifyError::NoUsableTracks { tracks: 2 }));
    }

    #[test]
    fn test_engine_failure_per_track_not_fatal() {
        let tracks = vec![raw_track("a", 0.5), raw_track("b", 0.5)];
        let predictions = predict_tracks(&BrokenClassifier, &tracks, 5).unwrap();
        assert!(predictions.iter().all(|p| p.outcome.is_err()));

        let err = analyze_with(&BrokenClassifier, &tracks, 5).unwrap_err();
        assert!(matches!(err, ClassifyError::NoUsableTracks { tracks: 2 }));
    }
}
