/// Brands offered by the picker. "Any" means no brand filter.
pub const DEFAULT_BRANDS: [&str; 11] = [
    "Any", "Apple", "Samsung", "Google", "Xiaomi", "Realme", "Oppo", "Vivo", "Honor", "Nothing",
    "OnePlus",
];

/// Turn a picker/CLI brand into the query value (None for "Any" or blank)
pub fn normalize_brand(brand: &str) -> Option<String> {
    let brand = brand.trim();
    if brand.is_empty() || brand.eq_ignore_ascii_case("any") {
        None
    } else {
        Some(brand.to_string())
    }
}

/// Brand list with "Any" guaranteed at the front
pub fn brand_options(configured: Option<&[String]>) -> Vec<String> {
    let mut options: Vec<String> = match configured {
        Some(list) if !list.is_empty() => list
            .iter()
            .filter(|b| !b.trim().is_empty() && !b.trim().eq_ignore_ascii_case("any"))
            .map(|b| b.trim().to_string())
            .collect(),
        _ => DEFAULT_BRANDS[1..].iter().map(|b| b.to_string()).collect(),
    };
    options.insert(0, "Any".to_string());
    options
}
