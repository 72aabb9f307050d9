//! Top-k selection over a class distribution.

use std::cmp::Ordering;

use crate::error::{DaypartError, Result};

/// Select the `k` highest-probability entries of `dist`.
///
/// Returns `(class index, probability)` pairs sorted by probability
/// descending; equal probabilities rank the lower class index first, and the
/// first-encountered index wins a spot in the top set on a tie at the
/// cut-off. Probabilities are taken as-is (model output, not necessarily
/// normalized).
///
/// # Errors
///
/// `InvalidK` if `k` exceeds the distribution length.
pub fn top_k(dist: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
    if k > dist.len() {
        return Err(DaypartError::InvalidK {
            k,
            classes: dist.len(),
        });
    }

    // Running top-set: push each index, evict the weakest once the set
    // exceeds k. Keeps earlier indices on equal probability.
    let mut top: Vec<usize> = Vec::with_capacity(k + 1);
    for i in 0..dist.len() {
        top.push(i);
        if top.len() > k {
            top.sort_by(|&a, &b| compare(dist, a, b));
            top.pop();
        }
    }
    top.sort_by(|&a, &b| compare(dist, a, b));

    Ok(top.into_iter().map(|i| (i, dist[i])).collect())
}

/// Probability descending, class index ascending on equal probability.
fn compare(dist: &[f32], a: usize, b: usize) -> Ordering {
    dist[b]
        .partial_cmp(&dist[a])
        .unwrap_or(Ordering::Equal)
        .then(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_three_of_five() {
        let dist = [0.1, 0.5, 0.05, 0.3, 0.05];
        let ranked = top_k(&dist, 3).unwrap();
        assert_eq!(ranked, vec![(1, 0.5), (3, 0.3), (0, 0.1)]);
    }

    #[test]
    fn test_tie_prefers_lower_index() {
        let ranked = top_k(&[0.2, 0.2, 0.6], 2).unwrap();
        assert_eq!(ranked, vec![(2, 0.6), (0, 0.2)]);
    }

    #[test]
    fn test_full_width_is_sorted_descending() {
        let dist = [0.1, 0.5, 0.05, 0.3, 0.05];
        let ranked = top_k(&dist, 5).unwrap();
        let indices: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        // The 0.05 tie between classes 2 and 4 resolves to the lower index.
        assert_eq!(indices, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_k_zero_is_empty() {
        assert!(top_k(&[0.3, 0.7], 0).unwrap().is_empty());
    }

    #[test]
    fn test_k_too_large_is_invalid() {
        let err = top_k(&[0.3, 0.7], 3).unwrap_err();
        assert_eq!(err, DaypartError::InvalidK { k: 3, classes: 2 });
    }

    #[test]
    fn test_all_equal_keeps_index_order() {
        let ranked = top_k(&[0.2; 5], 3).unwrap();
        let indices: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
