//! Portfolio analytics over a claim set
//!
//! Pure aggregation: no I/O, no failure modes. An empty set produces the
//! degenerate summary (zero count, `0.0` average, empty breakdown).

use serde::{Deserialize, Serialize};

use crate::claim::Claim;

/// Bucket for claims without an `aspect`.
pub const DEFAULT_CATEGORY: &str = "other";

/// Number of claims in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Aggregated view of a claim set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub count: usize,

    /// Mean star rating (missing stars count as 0), rounded to one decimal
    pub average_rating: f64,

    /// Counts per category, largest first; ties keep first-seen order
    pub category_breakdown: Vec<CategoryCount>,

    /// Claims per star value; index 0 is one star, index 4 is five stars
    pub rating_distribution: [usize; 5],
}

impl PortfolioSummary {
    /// Average rating rendered with one decimal, e.g. `"4.3"`.
    pub fn average_rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }

    /// Number of claims rated exactly `stars` (0 for values outside 1-5).
    pub fn rated(&self, stars: u8) -> usize {
        match stars {
            1..=5 => self.rating_distribution[usize::from(stars) - 1],
            _ => 0,
        }
    }

    /// The category with the most claims, if any.
    pub fn top_category(&self) -> Option<&CategoryCount> {
        self.category_breakdown.first()
    }
}

/// Summarize a claim set.
pub fn summarize(claims: &[Claim]) -> PortfolioSummary {
    if claims.is_empty() {
        return PortfolioSummary::default();
    }

    let total_stars: u64 = claims
        .iter()
        .map(|c| u64::from(c.stars.unwrap_or(0)))
        .sum();
    let mean = total_stars as f64 / claims.len() as f64;

    let mut breakdown: Vec<CategoryCount> = Vec::new();
    let mut distribution = [0usize; 5];

    for claim in claims {
        let category = claim.aspect.as_deref().unwrap_or(DEFAULT_CATEGORY);
        match breakdown.iter_mut().find(|b| b.category == category) {
            Some(bucket) => bucket.count += 1,
            None => breakdown.push(CategoryCount {
                category: category.to_string(),
                count: 1,
            }),
        }

        if let Some(stars @ 1..=5) = claim.stars {
            distribution[usize::from(stars) - 1] += 1;
        }
    }

    // Stable: equal counts keep first-encountered order
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));

    PortfolioSummary {
        count: claims.len(),
        average_rating: round_one_decimal(mean),
        category_breakdown: breakdown,
        rating_distribution: distribution,
    }
}

/// Round half away from zero to one decimal place.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
