use serde::{Deserialize, Serialize};
use std::fmt;

/// Spec sections the server scores individually (each on a 0-10 scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Camera,
    Display,
    Soc,
    Ram,
    Storage,
    Battery,
    Charging,
    Durability,
    Protection,
    Extras,
}

/// Which half of the breakdown panel a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryGroup {
    Core,
    Build,
}

impl Category {
    /// Display order used by the breakdown panel
    pub const ALL: [Category; 10] = [
        Category::Camera,
        Category::Display,
        Category::Soc,
        Category::Ram,
        Category::Storage,
        Category::Battery,
        Category::Charging,
        Category::Durability,
        Category::Protection,
        Category::Extras,
    ];

    /// Key used in `score_breakdown` maps and config files
    pub fn key(self) -> &'static str {
        match self {
            Category::Camera => "camera",
            Category::Display => "display",
            Category::Soc => "soc",
            Category::Ram => "ram",
            Category::Storage => "storage",
            Category::Battery => "battery",
            Category::Charging => "charging",
            Category::Durability => "durability",
            Category::Protection => "protection",
            Category::Extras => "extras",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Camera => "Camera",
            Category::Display => "Display",
            Category::Soc => "Performance",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Battery => "Battery",
            Category::Charging => "Charging",
            Category::Durability => "Durability",
            Category::Protection => "Protection",
            Category::Extras => "Extras",
        }
    }

    pub fn group(self) -> CategoryGroup {
        match self {
            Category::Camera
            | Category::Display
            | Category::Soc
            | Category::Ram
            | Category::Storage => CategoryGroup::Core,
            _ => CategoryGroup::Build,
        }
    }

    /// Look up a category by its breakdown key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Category> {
        let key = key.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn test_from_key_case_insensitive() {
        assert_eq!(Category::from_key("SoC"), Some(Category::Soc));
        assert_eq!(Category::from_key(" ram "), Some(Category::Ram));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(Category::from_key("speakers"), None);
    }

    #[test]
    fn test_groups_split_five_and_five() {
        let core = Category::ALL
            .iter()
            .filter(|c| c.group() == CategoryGroup::Core)
            .count();
        assert_eq!(core, 5);
        assert_eq!(Category::Battery.group(), CategoryGroup::Build);
    }
}
