use std::collections::HashMap;

use super::config::CategoryOverride;
use super::tier::{builtin_thresholds, SCORE_MAX, SCORE_MIN};
use crate::catalog::Category;

/// Validate category overrides at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_categories(overrides: &HashMap<String, CategoryOverride>) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Sorted so error output is stable
    let mut keys: Vec<&String> = overrides.keys().collect();
    keys.sort();

    for key in keys {
        let ov = &overrides[key];
        let Some(category) = Category::from_key(key) else {
            let known: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
            errors.push(format!(
                "categories.{}: unknown category (expected one of {})",
                key,
                known.join(", ")
            ));
            continue;
        };

        let mut bounds_ok = true;
        for (name, value) in [("poor", ov.poor), ("good", ov.good), ("great", ov.great)] {
            if let Some(v) = value {
                if !v.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&v) {
                    errors.push(format!(
                        "categories.{}.{}: must be between {} and {}, got {}",
                        key, name, SCORE_MIN, SCORE_MAX, v
                    ));
                    bounds_ok = false;
                }
            }
        }

        // Ordering is checked on the merged result, so a lone override can
        // still conflict with a built-in bound
        if bounds_ok {
            let t = ov.merge_thresholds(builtin_thresholds(category));
            if !(t.poor <= t.good && t.good <= t.great) {
                errors.push(format!(
                    "categories.{}: bounds must satisfy poor <= good <= great (got {} / {} / {})",
                    key, t.poor, t.good, t.great
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
