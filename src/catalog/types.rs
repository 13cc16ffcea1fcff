use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::category::Category;
use super::number::LenientNumber;

/// One product record as returned by the recommendation service.
///
/// Only the fields the client reads are typed; everything else the server
/// sends is kept in `extra` so the record can be written back out as-is.
/// A typed field holding the wrong JSON type reads as absent without
/// affecting the rest of the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>, // Stable identifier
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>, // Years, or "Unknown"
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_sgd: Option<LenientNumber>, // Decimal string from the server
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub price_url: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ram_gb: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub storage_gb: Option<f64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub refresh_hz: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ppi: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub res_w: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub res_h: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub battery_mah: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub charging_w: Option<f64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub main_mp: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub camera_main_mp: Option<String>, // e.g. "50 MP + 12 MP"
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub front_mp: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub has_ois: Option<bool>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub has_5g: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub has_nfc: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub has_stereo_speakers: Option<bool>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub glass_type: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ip_rating: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_score: Option<LenientNumber>, // Capability, 0-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smartbuy_score: Option<LenientNumber>, // Points per $100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<LenientNumber>, // Server's blended ordering score
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<BTreeMap<String, LenientNumber>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Phone {
    /// Stable identifier: the slug, falling back to the server's numeric id
    pub fn identity(&self) -> Option<String> {
        if let Some(slug) = self.slug.as_deref().filter(|s| !s.is_empty()) {
            return Some(slug.to_string());
        }
        match self.extra.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Name shown in lists
    pub fn display_name(&self) -> String {
        self.model
            .clone()
            .or_else(|| self.identity())
            .unwrap_or_else(|| "(unnamed)".to_string())
    }

    pub fn raw_score_value(&self) -> Option<f64> {
        self.raw_score.as_ref().and_then(LenientNumber::as_f64)
    }

    pub fn smartbuy_value(&self) -> Option<f64> {
        self.smartbuy_score.as_ref().and_then(LenientNumber::as_f64)
    }

    pub fn price(&self) -> Option<f64> {
        self.price_sgd.as_ref().and_then(LenientNumber::as_f64)
    }

    /// Sub-score for a category, if present and numeric
    pub fn breakdown_value(&self, category: Category) -> Option<f64> {
        self.score_breakdown
            .as_ref()
            .and_then(|b| b.get(category.key()))
            .and_then(LenientNumber::as_f64)
    }

    /// Short human-readable spec line for one breakdown category
    pub fn spec_summary(&self, category: Category) -> String {
        match category {
            Category::Camera => self.camera_summary(),
            Category::Display => self.display_summary(),
            Category::Soc => self.chipset.clone().unwrap_or_default(),
            Category::Ram => fmt_unit(self.ram_gb, "GB"),
            Category::Storage => fmt_unit(self.storage_gb, "GB"),
            Category::Battery => fmt_nonzero(self.battery_mah, " mAh"),
            Category::Charging => fmt_nonzero(self.charging_w, "W"),
            Category::Durability => non_empty_or_dash(self.glass_type.as_deref()),
            Category::Protection => non_empty_or_dash(self.ip_rating.as_deref()),
            Category::Extras => self.extras_summary(),
        }
    }

    fn camera_summary(&self) -> String {
        let rear = match self.camera_main_mp.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None => fmt_nonzero(self.main_mp, " MP"),
        };

        let mut add = Vec::new();
        if self.has_ois == Some(true) {
            add.push("OIS".to_string());
        }
        if let Some(front) = self.front_mp.filter(|v| *v != 0.0) {
            add.push(format!("Front {} MP", fmt_num(front)));
        }

        let extras = if add.is_empty() {
            String::new()
        } else {
            format!("({})", add.join(", "))
        };

        join_non_empty(&[rear, extras], " ")
    }

    fn display_summary(&self) -> String {
        let panel = self
            .display_type
            .as_deref()
            .map(|t| t.replace('_', " ").to_uppercase())
            .unwrap_or_default();
        let resolution = match (self.res_w, self.res_h) {
            (Some(w), Some(h)) if w != 0.0 && h != 0.0 => {
                format!("{}×{}", fmt_num(w), fmt_num(h))
            }
            _ => String::new(),
        };

        join_non_empty(
            &[
                panel,
                fmt_nonzero(self.refresh_hz, "Hz"),
                resolution,
                fmt_nonzero(self.ppi, "ppi"),
            ],
            " • ",
        )
    }

    fn extras_summary(&self) -> String {
        let mut bits = Vec::new();
        if self.has_5g == Some(true) {
            bits.push("5G");
        }
        if self.has_nfc == Some(true) {
            bits.push("NFC");
        }
        if self.has_stereo_speakers == Some(true) {
            bits.push("Stereo");
        }
        bits.join(" • ")
    }
}

// Wrong JSON type for a field reads as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Format a number without a trailing ".0" for whole values
pub fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// Zero counts as present ("0GB")
fn fmt_unit(n: Option<f64>, unit: &str) -> String {
    n.map(|v| format!("{}{}", fmt_num(v), unit)).unwrap_or_default()
}

fn fmt_nonzero(n: Option<f64>, unit: &str) -> String {
    match n {
        Some(v) if v != 0.0 => format!("{}{}", fmt_num(v), unit),
        _ => String::new(),
    }
}

fn non_empty_or_dash(s: Option<&str>) -> String {
    match s {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

fn join_non_empty(parts: &[String], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(sep)
}
