//! Rating normalization and score blending.

/// Upper bound of the source rating scale.
pub const RATING_SCALE_MAX: f64 = 5.0;

/// Rescale a raw `0..=5` rating string to `0..=1`.
///
/// Anything that does not parse as a finite number (empty, `"Not
/// Calibrated"`, `"NaN"`) contributes 0. Out-of-scale values are not
/// clamped.
pub fn normalize_rating(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v / RATING_SCALE_MAX,
        _ => 0.0,
    }
}

/// Convex combination of similarity and normalized rating.
///
/// `rating_weight` is the share given to the rating; similarity gets the rest.
pub fn blend_score(similarity: f64, normalized_rating: f64, rating_weight: f64) -> f64 {
    similarity * (1.0 - rating_weight) + normalized_rating * rating_weight
}
