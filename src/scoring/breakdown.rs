use serde::Serialize;

use super::config::CategoryTable;
use super::tier::{clamp_score, Tier};
use crate::catalog::{Category, CategoryGroup, Phone};
use crate::filters::Mode;

/// One line of the spec breakdown panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub category: Category,
    pub label: &'static str,  // e.g. "Performance" for soc
    pub meta: String,         // e.g. "OLED • 120Hz • 1080×2400"
    pub value: f64,           // Clamped to 0-10
    pub tier: Tier,
    pub message: String,      // Tier message for this category
    pub description: String,  // What the category measures
    pub target: &'static str, // What the current mode should aim for
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown {
    pub core: Vec<BreakdownRow>,
    pub build: Vec<BreakdownRow>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.build.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &BreakdownRow> {
        self.core.iter().chain(self.build.iter())
    }
}

/// Build the breakdown rows for a phone.
///
/// Categories without a numeric sub-score are skipped. Rows come out in the
/// fixed panel order and are split into core and build groups.
pub fn build_breakdown(phone: &Phone, table: &CategoryTable, mode: Mode) -> Breakdown {
    let mut breakdown = Breakdown::default();

    for category in Category::ALL {
        let Some(raw) = phone.breakdown_value(category) else {
            continue;
        };
        let value = clamp_score(raw);
        let tier = table.classify(value, category.key());
        let (message, description) = match table.config(category) {
            Some(config) => (
                config.messages.get(tier).to_string(),
                config.description.clone(),
            ),
            None => (String::new(), String::new()),
        };

        let row = BreakdownRow {
            category,
            label: category.label(),
            meta: phone.spec_summary(category),
            value,
            tier,
            message,
            description,
            target: mode.target(category),
        };

        match category.group() {
            CategoryGroup::Core => breakdown.core.push(row),
            CategoryGroup::Build => breakdown.build.push(row),
        }
    }

    breakdown
}

/// Traffic-light level for the headline badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeLevel {
    High,
    Mid,
    Low,
}

/// Spec score badge: compared at the one-decimal precision it is shown with
pub fn spec_badge(raw_score: Option<f64>) -> BadgeLevel {
    match raw_score.map(|s| round_to(s, 1)) {
        Some(s) if s >= 7.0 => BadgeLevel::High,
        Some(s) if s >= 6.0 => BadgeLevel::Mid,
        _ => BadgeLevel::Low,
    }
}

/// SmartBuy badge: compared at the two-decimal precision it is shown with
pub fn value_badge(smartbuy: Option<f64>) -> BadgeLevel {
    match smartbuy.map(|s| round_to(s, 2)) {
        Some(s) if s >= 1.5 => BadgeLevel::High,
        Some(s) if s >= 1.1 => BadgeLevel::Mid,
        _ => BadgeLevel::Low,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LenientNumber;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn phone_with(scores: &[(&str, serde_json::Value)]) -> Phone {
        let breakdown: BTreeMap<String, LenientNumber> = scores
            .iter()
            .map(|(k, v)| (k.to_string(), LenientNumber(v.clone())))
            .collect();
        Phone {
            model: Some("Test".to_string()),
            ram_gb: Some(12.0),
            battery_mah: Some(5000.0),
            score_breakdown: Some(breakdown),
            ..Phone::default()
        }
    }

    #[test]
    fn test_no_breakdown_is_empty() {
        let b = build_breakdown(&Phone::default(), &CategoryTable::default(), Mode::Budget);
        assert!(b.is_empty());
    }

    #[test]
    fn test_rows_split_and_ordered() {
        let phone = phone_with(&[
            ("battery", json!(9.0)),
            ("ram", json!(7.5)),
            ("camera", json!(5.0)),
        ]);
        let b = build_breakdown(&phone, &CategoryTable::default(), Mode::Midrange);

        let core: Vec<Category> = b.core.iter().map(|r| r.category).collect();
        assert_eq!(core, vec![Category::Camera, Category::Ram]);
        assert_eq!(b.build.len(), 1);
        assert_eq!(b.build[0].category, Category::Battery);
        assert_eq!(b.rows().count(), 3);
    }

    #[test]
    fn test_row_contents() {
        let phone = phone_with(&[("ram", json!(7.5))]);
        let b = build_breakdown(&phone, &CategoryTable::default(), Mode::Budget);
        let row = &b.core[0];
        assert_eq!(row.label, "RAM");
        assert_eq!(row.meta, "12GB");
        assert_eq!(row.tier, Tier::Good);
        assert!(row.message.starts_with("12GB"));
        assert_eq!(row.target, "≥ 8GB");
    }

    #[test]
    fn test_non_numeric_rows_skipped() {
        let phone = phone_with(&[("camera", json!(null)), ("display", json!("bad"))]);
        let b = build_breakdown(&phone, &CategoryTable::default(), Mode::Budget);
        assert!(b.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let phone = phone_with(&[("speakers", json!(9.0))]);
        let b = build_breakdown(&phone, &CategoryTable::default(), Mode::Budget);
        assert!(b.is_empty());
    }

    #[test]
    fn test_value_clamped() {
        let phone = phone_with(&[("extras", json!(14.0))]);
        let b = build_breakdown(&phone, &CategoryTable::default(), Mode::Budget);
        assert_eq!(b.build[0].value, 10.0);
        assert_eq!(b.build[0].tier, Tier::Great);
    }

    #[test]
    fn test_spec_badge() {
        assert_eq!(spec_badge(Some(7.2)), BadgeLevel::High);
        assert_eq!(spec_badge(Some(6.96)), BadgeLevel::High); // shows as 7.0
        assert_eq!(spec_badge(Some(6.0)), BadgeLevel::Mid);
        assert_eq!(spec_badge(Some(5.9)), BadgeLevel::Low);
        assert_eq!(spec_badge(None), BadgeLevel::Low);
    }

    #[test]
    fn test_value_badge() {
        assert_eq!(value_badge(Some(1.5)), BadgeLevel::High);
        assert_eq!(value_badge(Some(1.1)), BadgeLevel::Mid);
        assert_eq!(value_badge(Some(1.094)), BadgeLevel::Low);
        assert_eq!(value_badge(None), BadgeLevel::Low);
    }
}
