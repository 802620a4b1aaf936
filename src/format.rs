//! Display helpers for UI and email consumers.

/// Relative age of a Unix-seconds timestamp, e.g. `"3 hours ago"`.
///
/// Days are used only beyond 24 hours; under an hour the age is in minutes.
pub fn format_time_ago(timestamp: i64, now: i64) -> String {
    let minutes = now.saturating_sub(timestamp).max(0) / 60;
    let hours = minutes / 60;

    if hours > 24 {
        let days = hours / 24;
        format!("{days} day{} ago", plural(days))
    } else if hours >= 1 {
        format!("{hours} hour{} ago", plural(hours))
    } else {
        format!("{minutes} minute{} ago", plural(minutes))
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}

/// Compact USD market cap: `"$3.10T"`, `"$900.00B"`, `"$25.00M"`, `"$999999.99"`.
/// Non-finite or non-positive input gives `"N/A"`.
pub fn format_market_cap(usd: f64) -> String {
    if !usd.is_finite() || usd <= 0.0 {
        return "N/A".to_string();
    }
    if usd >= 1e12 {
        format!("${:.2}T", usd / 1e12)
    } else if usd >= 1e9 {
        format!("${:.2}B", usd / 1e9)
    } else if usd >= 1e6 {
        format!("${:.2}M", usd / 1e6)
    } else {
        format!("${usd:.2}")
    }
}

/// Signed percentage with two decimals (`"+1.23%"`, `"-0.50%"`); empty for
/// missing or zero change.
pub fn format_change_percent(pct: Option<f64>) -> String {
    match pct {
        Some(p) if p != 0.0 && p.is_finite() => {
            let sign = if p > 0.0 { "+" } else { "" };
            format!("{sign}{p:.2}%")
        }
        _ => String::new(),
    }
}

/// USD price with thousands separators, e.g. `"$1,234.50"`. Non-finite input gives `"N/A"`.
pub fn format_price(usd: f64) -> String {
    if !usd.is_finite() {
        return "N/A".to_string();
    }
    let sign = if usd < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", usd.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac}")
}
