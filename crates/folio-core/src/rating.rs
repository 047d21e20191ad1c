//! Star rating to trust score mapping
//!
//! Ratings are collected as 1-5 stars and stored alongside a continuous
//! score in [-1, 1]. Both the local and the remote path go through
//! [`stars_to_score`] so a claim scores the same wherever it lives.

/// Midpoint of the star scale. 3 stars lands slightly positive (0.2).
pub const STAR_MIDPOINT: f64 = 2.5;

/// Map a 1-5 star rating onto [-1, 1].
///
/// `(stars - 2.5) / 2.5`: 1 → -0.6, 2 → -0.2, 3 → 0.2, 4 → 0.6, 5 → 1.0.
/// Inputs outside 1-5 are not clamped.
pub fn stars_to_score(stars: u8) -> f64 {
    (f64::from(stars) - STAR_MIDPOINT) / STAR_MIDPOINT
}

/// Pick the score to persist: an explicit score wins, otherwise it is
/// derived from the stars, otherwise there is none.
pub fn resolve_score(stars: Option<u8>, score: Option<f64>) -> Option<f64> {
    score.or_else(|| stars.map(stars_to_score))
}
