//! Max-price picker: fixed caps in SGD plus an "Any" sentinel.
//!
//! The numeric side is what gets sent as `max_price=`; the label side is
//! what the picker shows. `label_of(value_of(l)) == l` for every label
//! except the top cap, which collapses into "Any".

/// Offered caps, ascending
pub const PRICE_CAPS: [u32; 14] = [
    100, 200, 300, 400, 500, 600, 700, 800, 1000, 1200, 1500, 1800, 2000, 2400,
];

pub const PRICE_MIN: u32 = 100;
pub const PRICE_MAX: u32 = 2400;

pub const ANY_LABEL: &str = "Any";

/// Clamp an arbitrary price into the supported range
pub fn clamp_price(value: f64) -> f64 {
    value.clamp(PRICE_MIN as f64, PRICE_MAX as f64)
}

/// Label for one cap, e.g. "≤ $1,000"
pub fn format_cap(cap: u32) -> String {
    format!("≤ ${}", group_thousands(cap))
}

/// All picker labels in display order ("Any" first)
pub fn labels() -> Vec<String> {
    std::iter::once(ANY_LABEL.to_string())
        .chain(PRICE_CAPS.iter().map(|&c| format_cap(c)))
        .collect()
}

/// Label shown for a numeric ceiling: the smallest cap at or above the
/// clamped value, or "Any" once the value reaches the top of the range.
pub fn label_of(value: f64) -> String {
    if value.is_nan() {
        return ANY_LABEL.to_string();
    }
    let clamped = clamp_price(value);
    if clamped >= PRICE_MAX as f64 {
        return ANY_LABEL.to_string();
    }
    match PRICE_CAPS.iter().find(|&&c| clamped <= c as f64) {
        Some(&cap) if cap < PRICE_MAX => format_cap(cap),
        _ => ANY_LABEL.to_string(),
    }
}

/// Label for an optional ceiling (no filter shows as "Any")
pub fn label_for(value: Option<f64>) -> String {
    value.map(label_of).unwrap_or_else(|| ANY_LABEL.to_string())
}

/// Numeric ceiling for a label. "Any", and labels without a usable number,
/// map to the top of the range.
pub fn value_of(label: &str) -> u32 {
    if label.trim().eq_ignore_ascii_case(ANY_LABEL) {
        return PRICE_MAX;
    }
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => PRICE_MAX,
        Ok(n) => n.clamp(PRICE_MIN as u64, PRICE_MAX as u64) as u32,
    }
}

/// Normalise user input for `--max-price`: a plain number is clamped
/// (overflowing to infinity clamps too, NaN means no cap), anything else is
/// read as a picker label.
pub fn parse_max_price(input: &str) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_nan() => PRICE_MAX,
        Ok(v) => clamp_price(v).round() as u32,
        Err(_) => value_of(input),
    }
}

/// Move one label along the picker from the label for `current`.
/// The top cap reads back as "Any", so stepping forward from it starts
/// over at the cheapest cap.
pub fn step(current: Option<f64>, forward: bool) -> u32 {
    let all = labels();
    let current_label = label_for(current);
    let idx = all.iter().position(|l| *l == current_label).unwrap_or(0);
    let next = if forward {
        (idx + 1).min(all.len() - 1)
    } else {
        idx.saturating_sub(1)
    };
    value_of(&all[next])
}

fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
