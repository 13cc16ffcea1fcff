pub mod breakdown;
pub mod config;
pub mod tier;
pub mod validation;

pub use breakdown::{build_breakdown, spec_badge, value_badge, BadgeLevel, Breakdown, BreakdownRow};
pub use config::*;
pub use tier::{classify, clamp_score, Thresholds, Tier, DEFAULT_THRESHOLDS};
pub use validation::validate_categories;
