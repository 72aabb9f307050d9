//! Interval-to-interval value remapping.
//!
//! The classifier was trained on descriptors rescaled into [-1, 1]; this is
//! the rescaling primitive. Either interval may be passed reversed
//! (min/max swapped) to flip the mapping direction.

/// Linearly remap `x` from `[old_min, old_max]` into `[new_min, new_max]`.
///
/// Passing an interval reversed (first bound greater than the second) flips
/// that end of the mapping: a reversed source measures `x` from the upper
/// bound, a reversed target mirrors the result inside the target interval.
///
/// No clamping: `x` outside the source interval extrapolates linearly past
/// the target bounds. A zero-width source interval divides by zero and
/// yields a non-finite value; the fixed descriptor ranges used by
/// [`crate::vectorize`] are all non-degenerate, so hitting that here is a
/// caller bug, not a runtime condition worth validating.
pub fn remap(x: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    let old_lo = old_min.min(old_max);
    let old_hi = old_min.max(old_max);
    let new_lo = new_min.min(new_max);
    let new_hi = new_min.max(new_max);

    let scale = (new_hi - new_lo) / (old_hi - old_lo);
    let portion = if old_min > old_max {
        // Reversed source: position measured from the upper bound.
        (old_hi - x) * scale
    } else {
        (x - old_lo) * scale
    };

    if new_min > new_max {
        new_hi - portion
    } else {
        portion + new_lo
    }
}
