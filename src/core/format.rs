//! Display formatting for amounts and dates

use chrono::{DateTime, Utc};

/// Group the integer digits of `digits` with commas
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format an amount as US dollars, e.g. `$12,345.60` or `-$5.00`
pub fn format_usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(&(cents / 100).to_string()),
        cents % 100
    )
}

/// Format a number with grouped thousands and at most two decimals,
/// dropping trailing zeros (`15000` → `15,000`, `12.5` → `12.5`)
pub fn format_number(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(&(cents / 100).to_string());
    let fraction = cents % 100;
    if fraction == 0 {
        format!("{}{}", sign, whole)
    } else {
        let decimals = format!("{:02}", fraction);
        format!("{}{}.{}", sign, whole, decimals.trim_end_matches('0'))
    }
}

/// Format a timestamp as `Oct 07, 2026`
pub fn format_date_label(date: &DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}
