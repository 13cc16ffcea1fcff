use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::tier::{builtin_thresholds, Thresholds, Tier, DEFAULT_THRESHOLDS};
use crate::catalog::Category;

/// One-line explanation for each tier of a category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TierMessages {
    pub poor: String,
    pub needs_work: String,
    pub good: String,
    pub great: String,
}

impl TierMessages {
    pub fn get(&self, tier: Tier) -> &str {
        match tier {
            Tier::Poor => &self.poor,
            Tier::NeedsWork => &self.needs_work,
            Tier::Good => &self.good,
            Tier::Great => &self.great,
        }
    }
}

/// Everything the breakdown panel knows about a category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    pub thresholds: Thresholds,
    pub description: String,
    pub messages: TierMessages,
}

/// Per-category thresholds and copy.
///
/// Built from the defaults below, optionally merged with overrides from the
/// config file (see `CategoryOverride`).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    entries: BTreeMap<Category, CategoryConfig>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        let entries = Category::ALL
            .into_iter()
            .map(|category| (category, builtin_config(category)))
            .collect();
        Self { entries }
    }
}

impl CategoryTable {
    /// Look up a category by breakdown key
    pub fn get(&self, key: &str) -> Option<&CategoryConfig> {
        Category::from_key(key).and_then(|c| self.entries.get(&c))
    }

    pub fn config(&self, category: Category) -> Option<&CategoryConfig> {
        self.entries.get(&category)
    }

    /// Boundaries for a key, falling back to the defaults
    pub fn thresholds_for(&self, key: &str) -> Thresholds {
        self.get(key)
            .map(|c| c.thresholds)
            .unwrap_or(DEFAULT_THRESHOLDS)
    }

    pub fn classify(&self, score: f64, key: &str) -> Tier {
        self.thresholds_for(key).classify(score)
    }

    /// Tier message for a category, empty for unknown keys
    pub fn message(&self, key: &str, tier: Tier) -> &str {
        self.get(key).map(|c| c.messages.get(tier)).unwrap_or("")
    }

    /// Merge overrides into the built-in table.
    ///
    /// Overrides are assumed valid (run `validate_categories` first); unknown
    /// keys are ignored here.
    pub fn with_overrides(overrides: &HashMap<String, CategoryOverride>) -> Self {
        let mut table = Self::default();
        for (key, ov) in overrides {
            let Some(category) = Category::from_key(key) else {
                continue;
            };
            if let Some(entry) = table.entries.get_mut(&category) {
                entry.thresholds = ov.merge_thresholds(entry.thresholds);
                if let Some(ref description) = ov.description {
                    entry.description = description.clone();
                }
                if let Some(ref messages) = ov.messages {
                    messages.apply(&mut entry.messages);
                }
            }
        }
        table
    }
}

/// Config-file override for one category.
///
/// Example YAML:
/// ```yaml
/// categories:
///   camera:
///     great: 8.5
///     messages:
///       great: "Flagship-class photos."
///   battery:
///     poor: 4.0
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryOverride {
    #[serde(default)]
    pub poor: Option<f64>,
    #[serde(default)]
    pub good: Option<f64>,
    #[serde(default)]
    pub great: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub messages: Option<TierMessagesOverride>,
}

impl CategoryOverride {
    /// Apply the bound overrides on top of `base`
    pub fn merge_thresholds(&self, base: Thresholds) -> Thresholds {
        Thresholds {
            poor: self.poor.unwrap_or(base.poor),
            good: self.good.unwrap_or(base.good),
            great: self.great.unwrap_or(base.great),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierMessagesOverride {
    #[serde(default)]
    pub poor: Option<String>,
    #[serde(default)]
    pub needs_work: Option<String>,
    #[serde(default)]
    pub good: Option<String>,
    #[serde(default)]
    pub great: Option<String>,
}

impl TierMessagesOverride {
    fn apply(&self, messages: &mut TierMessages) {
        if let Some(ref s) = self.poor {
            messages.poor = s.clone();
        }
        if let Some(ref s) = self.needs_work {
            messages.needs_work = s.clone();
        }
        if let Some(ref s) = self.good {
            messages.good = s.clone();
        }
        if let Some(ref s) = self.great {
            messages.great = s.clone();
        }
    }
}

fn messages(poor: &str, needs_work: &str, good: &str, great: &str) -> TierMessages {
    TierMessages {
        poor: poor.to_string(),
        needs_work: needs_work.to_string(),
        good: good.to_string(),
        great: great.to_string(),
    }
}

fn builtin_config(category: Category) -> CategoryConfig {
    let (description, messages) = match category {
        Category::Camera => (
            "Photo/video quality; OIS helps steady shots and low light.",
            messages(
                "Soft photos; struggles in low light or motion.",
                "Usable, but low-light shots can be shaky or noisy.",
                "Dependable photos; OIS helps indoors.",
                "Sharp, steady photos with strong low-light results.",
            ),
        ),
        Category::Display => (
            "Screen type, smoothness (Hz), resolution and sharpness (ppi).",
            messages(
                "Dim or coarse text; motion may look rough.",
                "Okay screen; not very smooth or contrasty.",
                "Clear, smooth screen for everyday use.",
                "Fast, sharp OLED. Scrolling looks silky.",
            ),
        ),
        Category::Soc => (
            "Processor & graphics; affects speed, gaming and camera.",
            messages(
                "Feels slow with modern apps and games.",
                "Fine for basics; heavier apps can lag.",
                "Snappy in daily use and light gaming.",
                "Fast for apps, games and camera processing.",
            ),
        ),
        Category::Ram => (
            "How smoothly you can switch between apps; more RAM keeps them ready so they don't lag or start over.",
            messages(
                "4GB or less: feels slow; switching between apps stutters.",
                "6-8GB: fine for basics; app switching feels choppy/slow.",
                "12GB: smooth multitasking; most games stay responsive.",
                "16GB+: very smooth even with many apps and games open.",
            ),
        ),
        Category::Storage => (
            "Space for apps, photos and videos.",
            messages(
                "Very limited space; fills quickly.",
                "Enough for basics; watch large apps/media.",
                "Comfortable for photos and apps.",
                "Plenty of headroom for video and big apps.",
            ),
        ),
        Category::Battery => (
            "Battery size; larger usually lasts longer.",
            messages(
                "Needs frequent top-ups; may not last a day.",
                "Daylong use is tight; expect an afternoon charge.",
                "Should last a full day.",
                "Easily a day+ for most users.",
            ),
        ),
        Category::Charging => (
            "Charging power; higher is generally faster.",
            messages(
                "Slow: full charge 2+ hours.",
                "Average: 90-120 min to full; 10-20% in 15 min.",
                "Quick: 60-90 min to full; 20-35% in 15 min.",
                "Very quick: 30-50 min to full; 35-50% in 15 min.",
            ),
        ),
        Category::Durability => (
            "Glass family/toughness; helps with scratches and drops.",
            messages(
                "Basic glass; case and protector strongly advised.",
                "OK glass; use a case to avoid chips.",
                "Tough glass; a case still recommended.",
                "Reinforced glass; better protection from drops.",
            ),
        ),
        Category::Protection => (
            "Dust and water resistance (IP rating).",
            messages(
                "No real water resistance, avoid rain.",
                "Splash resistant; keep away from heavy rain.",
                "Good dust/splash protection.",
                "Full dust/water resistance (IP67/68/69).",
            ),
        ),
        Category::Extras => (
            "Quality-of-life features like 5G, NFC (tap-to-pay, transit cards, quick Bluetooth pairing), and stereo speakers.",
            messages(
                "Missing common features like NFC or stereo.",
                "Some extras present; a few omissions.",
                "Useful extras that improve daily use.",
                "Has 5G, NFC and stereo speakers.",
            ),
        ),
    };

    CategoryConfig {
        thresholds: builtin_thresholds(category),
        description: description.to_string(),
        messages,
    }
}
