use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Category;

/// Sub-scores live on a 0-10 scale
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Qualitative bucket for a 0-10 sub-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Poor,
    NeedsWork,
    Good,
    Great,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Poor, Tier::NeedsWork, Tier::Good, Tier::Great];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Poor => "Poor",
            Tier::NeedsWork => "Needs work",
            Tier::Good => "Good",
            Tier::Great => "Great",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tier boundaries for one category. Invariant: `poor <= good <= great`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub poor: f64,
    pub good: f64,
    pub great: f64,
}

/// Used for any category without its own entry
pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    poor: 3.5,
    good: 7.0,
    great: 8.5,
};

impl Default for Thresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

impl Thresholds {
    pub const fn new(poor: f64, good: f64, great: f64) -> Self {
        Self { poor, good, great }
    }

    /// Map a score to its tier.
    ///
    /// The score is clamped to 0-10 first (NaN counts as 0). Boundaries are
    /// uneven: `poor` is inclusive on the low side, `good` and
    /// `great` are inclusive on the high side.
    pub fn classify(&self, score: f64) -> Tier {
        let score = clamp_score(score);
        if score <= self.poor {
            Tier::Poor
        } else if score < self.good {
            Tier::NeedsWork
        } else if score < self.great {
            Tier::Good
        } else {
            Tier::Great
        }
    }
}

/// Clamp a sub-score into 0-10
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        SCORE_MIN
    } else {
        score.clamp(SCORE_MIN, SCORE_MAX)
    }
}

/// Built-in boundaries for each known category
pub const fn builtin_thresholds(category: Category) -> Thresholds {
    match category {
        Category::Camera | Category::Display | Category::Soc => Thresholds::new(3.5, 6.5, 8.0),
        Category::Ram | Category::Storage | Category::Charging => Thresholds::new(3.5, 7.0, 8.0),
        Category::Battery | Category::Durability | Category::Protection | Category::Extras => {
            Thresholds::new(3.5, 7.0, 8.5)
        }
    }
}

/// Classify a sub-score against the built-in table.
/// Unknown category keys use the default boundaries.
pub fn classify(score: f64, category: &str) -> Tier {
    Category::from_key(category)
        .map(builtin_thresholds)
        .unwrap_or(DEFAULT_THRESHOLDS)
        .classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_classify(score: f64) -> Tier {
        DEFAULT_THRESHOLDS.classify(score)
    }

    #[test]
    fn test_poor_bound_inclusive() {
        assert_eq!(default_classify(3.5), Tier::Poor);
    }

    #[test]
    fn test_just_above_poor() {
        assert_eq!(default_classify(3.51), Tier::NeedsWork);
    }

    #[test]
    fn test_good_bound_inclusive() {
        assert_eq!(default_classify(7.0), Tier::Good);
        assert_eq!(default_classify(6.99), Tier::NeedsWork);
    }

    #[test]
    fn test_great_bound_inclusive() {
        assert_eq!(default_classify(8.5), Tier::Great);
        assert_eq!(default_classify(8.49), Tier::Good);
    }

    #[test]
    fn test_clamped_below() {
        assert_eq!(default_classify(-1.0), Tier::Poor);
    }

    #[test]
    fn test_clamped_above() {
        assert_eq!(default_classify(11.0), Tier::Great);
    }

    #[test]
    fn test_nan_is_poor() {
        assert_eq!(default_classify(f64::NAN), Tier::Poor);
    }

    #[test]
    fn test_unknown_category_uses_defaults() {
        assert_eq!(classify(3.5, "speakers"), Tier::Poor);
        assert_eq!(classify(7.0, "speakers"), Tier::Good);
        assert_eq!(classify(8.5, "speakers"), Tier::Great);
    }

    #[test]
    fn test_category_specific_bounds() {
        // camera: great from 8.0
        assert_eq!(classify(8.0, "camera"), Tier::Great);
        assert_eq!(classify(6.5, "camera"), Tier::Good);
        // battery: great only from 8.5
        assert_eq!(classify(8.0, "battery"), Tier::Good);
        // ram: good from 7.0
        assert_eq!(classify(6.5, "ram"), Tier::NeedsWork);
    }

    #[test]
    fn test_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify(5.0, "display"), Tier::NeedsWork);
        }
    }

    #[test]
    fn test_builtin_thresholds_ordered() {
        for category in Category::ALL {
            let t = builtin_thresholds(category);
            assert!(t.poor <= t.good && t.good <= t.great, "{}", category);
        }
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(Tier::NeedsWork.label(), "Needs work");
        assert_eq!(
            serde_json::to_string(&Tier::NeedsWork).unwrap(),
            "\"needs_work\""
        );
    }
}
