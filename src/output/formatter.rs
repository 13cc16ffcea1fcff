use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::catalog::Phone;
use crate::filters::Mode;
use crate::ranking::RankedItem;
use crate::scoring::{
    build_breakdown, spec_badge, value_badge, BadgeLevel, BreakdownRow, CategoryTable, Tier,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
pub fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Spec score with one decimal ("8.2"), "-" when missing
pub fn format_spec(score: Option<f64>) -> String {
    score.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string())
}

/// SmartBuy points with two decimals ("1.23"), "-" when missing
pub fn format_value(score: Option<f64>) -> String {
    score.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "-".to_string())
}

/// Price in SGD ("S$1299.00"), "-" when missing
pub fn format_price(price: Option<f64>) -> String {
    price
        .map(|p| format!("S${:.2}", p))
        .unwrap_or_else(|| "-".to_string())
}

/// Warranty in years ("2y"). Non-numeric values such as "Unknown" are hidden.
pub fn format_warranty(phone: &Phone) -> Option<String> {
    let years = phone.warranty.as_deref()?.trim();
    let n: f64 = years.parse().ok()?;
    (n > 0.0).then(|| format!("{}y", crate::catalog::types::fmt_num(n)))
}

/// Position in the list ("#1 / 12")
pub fn format_rank(item: &RankedItem<Phone>) -> String {
    format!("#{} / {}", item.rank_final, item.rank_total)
}

fn paint(text: &str, level: BadgeLevel, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match level {
        BadgeLevel::High => text.green().bold().to_string(),
        BadgeLevel::Mid => text.yellow().to_string(),
        BadgeLevel::Low => text.red().to_string(),
    }
}

fn paint_tier(tier: Tier, use_colors: bool) -> String {
    let text = format!("{:<10}", tier.label());
    if !use_colors {
        return text;
    }
    match tier {
        Tier::Great => text.green().bold().to_string(),
        Tier::Good => text.green().to_string(),
        Tier::NeedsWork => text.yellow().to_string(),
        Tier::Poor => text.red().to_string(),
    }
}

/// Format ranked phones as a table.
/// Columns: Index, Spec, SmartBuy, Price, Model (no headers).
/// The first result is marked as the top pick.
pub fn format_results_table(items: &[RankedItem<Phone>], use_colors: bool) -> String {
    if items.is_empty() {
        return "No phones found.".to_string();
    }

    let term_width = get_terminal_width();
    let separator = "  ";
    // index(3) + space + spec(4) + sb(5) + price(10) + 3 separators
    let fixed_width = 3 + 1 + 4 + 5 + 10 + separator.len() * 4;

    items
        .iter()
        .enumerate()
        .map(|(idx, ranked)| {
            let phone = &ranked.item;
            let index_str = format!("{:>2}.", idx + 1);
            let spec = format!("{:>4}", format_spec(phone.raw_score_value()));
            let value = format!("{:>5}", format_value(phone.smartbuy_value()));
            let price = format!("{:>10}", format_price(phone.price()));
            let top = if idx == 0 { "  Top pick" } else { "" };

            let name = phone.display_name();
            let name = match term_width {
                Some(width) if width > fixed_width + top.len() + 10 => {
                    truncate_title(&name, width - fixed_width - top.len())
                }
                Some(_) => truncate_title(&name, 20),
                None => name,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    paint(&spec, spec_badge(phone.raw_score_value()), true),
                    separator,
                    paint(&value, value_badge(phone.smartbuy_value()), true),
                    separator,
                    price,
                    separator,
                    name.bold(),
                    top.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}",
                    index_str, spec, separator, value, separator, price, separator, name, top
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_breakdown_row(row: &BreakdownRow, use_colors: bool) -> String {
    let meta = if row.meta.is_empty() {
        String::new()
    } else {
        format!("  {}", row.meta)
    };
    let head = format!(
        "    {:<12} {:>4.1}  {}{}",
        row.label,
        row.value,
        paint_tier(row.tier, use_colors),
        meta
    );
    let target = format!("      Target: {}", row.target);
    if use_colors {
        format!("{}\n      {}\n{}", head, row.message, target.dimmed())
    } else {
        format!("{}\n      {}\n{}", head, row.message, target)
    }
}

/// Format one ranked phone with its headline numbers and the spec
/// breakdown, tier by tier
pub fn format_phone_detail(
    ranked: &RankedItem<Phone>,
    table: &CategoryTable,
    mode: Mode,
    use_colors: bool,
) -> String {
    let phone = &ranked.item;
    let mut lines = Vec::new();

    let name = phone.display_name();
    let mut header = if use_colors {
        name.bold().to_string()
    } else {
        name
    };
    if ranked.rank_final == 1 {
        header.push_str("  (Top pick)");
    }
    lines.push(header);

    let mut summary = format!(
        "  {}  {}",
        format_rank(ranked),
        format_price(phone.price())
    );
    if let Some(warranty) = format_warranty(phone) {
        summary.push_str(&format!("  Warranty {}", warranty));
    }
    lines.push(summary);

    let raw = phone.raw_score_value();
    let value = phone.smartbuy_value();
    lines.push(format!(
        "  Spec {}/10  SmartBuy {} pts/$100",
        paint(&format_spec(raw), spec_badge(raw), use_colors),
        paint(&format_value(value), value_badge(value), use_colors)
    ));
    lines.push(format!(
        "  Spec Rank #{} • SmartBuy Rank #{}",
        ranked.rank_raw, ranked.rank_value
    ));
    if let Some(ref url) = phone.price_url {
        let url = if use_colors {
            url.underline().to_string()
        } else {
            url.clone()
        };
        lines.push(format!("  {}", url));
    }

    let breakdown = build_breakdown(phone, table, mode);
    if breakdown.is_empty() {
        lines.push("  No breakdown available.".to_string());
    } else {
        for (title, rows) in [("Core", &breakdown.core), ("Build", &breakdown.build)] {
            if rows.is_empty() {
                continue;
            }
            lines.push(format!("  {}", title));
            lines.extend(rows.iter().map(|r| format_breakdown_row(r, use_colors)));
        }
    }

    lines.join("\n")
}

/// Format ranked phones as tab-separated values for scripting.
/// Columns: rank, model, price, spec, smartbuy, spec rank, smartbuy rank, url
/// (no headers, no colors)
pub fn format_tsv(items: &[RankedItem<Phone>]) -> String {
    items
        .iter()
        .map(|ranked| {
            let phone = &ranked.item;
            let price = phone.price().map(|p| format!("{:.2}", p)).unwrap_or_default();
            let raw = phone.raw_score_value().map(|s| format!("{:.1}", s)).unwrap_or_default();
            let value = phone.smartbuy_value().map(|s| format!("{:.2}", s)).unwrap_or_default();
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                ranked.rank_final,
                phone.display_name(),
                price,
                raw,
                value,
                ranked.rank_raw,
                ranked.rank_value,
                phone.price_url.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ranked phones as pretty JSON: the server records with the rank fields added
pub fn format_json(items: &[RankedItem<Phone>]) -> Result<String> {
    serde_json::to_string_pretty(items).context("Failed to serialize results")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LenientNumber;
    use crate::ranking::rank;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn sample_phone(model: &str, raw: f64, value: f64, price: &str) -> Phone {
        Phone {
            model: Some(model.to_string()),
            slug: Some(model.to_lowercase().replace(' ', "-")),
            price_sgd: Some(LenientNumber(json!(price))),
            price_url: Some(format!("https://shop.example.com/{}", model.len())),
            raw_score: Some(LenientNumber(json!(raw))),
            smartbuy_score: Some(LenientNumber(json!(value))),
            ..Phone::default()
        }
    }

    fn sample_ranked() -> Vec<RankedItem<Phone>> {
        rank(&[
            sample_phone("Pixel 9", 8.14, 0.62, "1299.00"),
            sample_phone("Galaxy A55", 6.4, 1.57, "549.5"),
        ])
    }

    #[test]
    fn test_format_spec_and_value() {
        assert_eq!(format_spec(Some(8.14)), "8.1");
        assert_eq!(format_spec(None), "-");
        assert_eq!(format_value(Some(1.5)), "1.50");
        assert_eq!(format_value(None), "-");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(549.5)), "S$549.50");
        assert_eq!(format_price(None), "-");
    }

    #[test]
    fn test_format_warranty() {
        let mut phone = Phone::default();
        assert_eq!(format_warranty(&phone), None);
        phone.warranty = Some("2".to_string());
        assert_eq!(format_warranty(&phone), Some("2y".to_string()));
        phone.warranty = Some("Unknown".to_string());
        assert_eq!(format_warranty(&phone), None);
    }

    #[test]
    fn test_format_rank() {
        let ranked = sample_ranked();
        assert_eq!(format_rank(&ranked[1]), "#2 / 2");
    }

    #[test]
    fn test_results_table_empty() {
        assert_eq!(format_results_table(&[], false), "No phones found.");
    }

    #[test]
    fn test_results_table() {
        let result = format_results_table(&sample_ranked(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("8.1"));
        assert!(lines[0].contains("S$1299.00"));
        assert!(lines[0].contains("Pixel 9"));
        assert!(lines[0].ends_with("Top pick"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("1.57"));
        assert!(!lines[1].contains("Top pick"));
    }

    #[test]
    fn test_tsv() {
        let result = format_tsv(&sample_ranked());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 8);
        assert!(lines[0].starts_with("1\tPixel 9\t1299.00\t8.1\t0.62\t1\t2\t"));
        assert!(lines[1].starts_with("2\tGalaxy A55\t549.50\t6.4\t1.57\t2\t1\t"));
    }

    #[test]
    fn test_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_json_is_flat() {
        let out = format_json(&sample_ranked()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["model"], "Pixel 9");
        assert_eq!(value[0]["rank_final"], 1);
        assert_eq!(value[1]["rank_value"], 1);
        assert_eq!(value[1]["price_sgd"], "549.5");
    }

    #[test]
    fn test_detail_with_breakdown() {
        let mut ranked = sample_ranked();
        let mut breakdown = BTreeMap::new();
        breakdown.insert("camera".to_string(), LenientNumber(json!(9.0)));
        breakdown.insert("battery".to_string(), LenientNumber(json!(3.0)));
        ranked[0].item.score_breakdown = Some(breakdown);
        ranked[0].item.warranty = Some("1".to_string());

        let out = format_phone_detail(&ranked[0], &CategoryTable::default(), Mode::Flagship, false);
        assert!(out.starts_with("Pixel 9  (Top pick)"));
        assert!(out.contains("#1 / 2"));
        assert!(out.contains("Warranty 1y"));
        assert!(out.contains("Spec 8.1/10  SmartBuy 0.62 pts/$100"));
        assert!(out.contains("Spec Rank #1 • SmartBuy Rank #2"));
        assert!(out.contains("  Core\n"));
        assert!(out.contains("  Build\n"));
        assert!(out.contains("Camera"));
        assert!(out.contains("Great"));
        assert!(out.contains("Poor"));
        assert!(out.contains("Target: "));
    }

    #[test]
    fn test_detail_without_breakdown() {
        let ranked = sample_ranked();
        let out = format_phone_detail(&ranked[1], &CategoryTable::default(), Mode::Budget, false);
        assert!(!out.contains("Top pick"));
        assert!(out.contains("No breakdown available."));
    }

    #[test]
    fn test_truncate_title_long() {
        assert_eq!(truncate_title("This is a very long title", 15), "This is a ve...");
    }

    #[test]
    fn test_truncate_title_very_narrow() {
        assert_eq!(truncate_title("Hello world", 3), "Hel");
    }
}
