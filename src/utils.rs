use chrono::{DateTime, Local, TimeZone};

use crate::tokens;

/// Conversion factor from wei to Gwei.
const GWEI: f64 = 1e9;

/// Values below this threshold are shown in scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 0.0001;

const ELLIPSIS: &str = "...";

/// Parses a raw integer fee. Accepts decimal and `0x`-prefixed hex strings.
pub fn parse_raw_fee(raw: &str) -> Option<u128> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() => u128::from_str_radix(hex, 16).ok(),
        Some(_) => None,
        None => raw.parse::<u128>().ok(),
    }
}

/// Formats a raw fee for display.
///
/// Native (gas-denominated) fees are shown in Gwei with two decimals, token
/// fees as a decimal amount with the symbol appended when known. A raw value
/// that is not an integer is returned unchanged.
pub fn format_fee(raw: &str, decimals: u32, is_native: bool, symbol: Option<&str>) -> String {
    let Some(value) = parse_raw_fee(raw) else {
        return raw.to_string();
    };

    if is_native {
        return format!("{:.2} Gwei", value as f64 / GWEI);
    }

    if value == 0 {
        return "0".to_string();
    }

    let amount = value as f64 / 10f64.powi(decimals as i32);
    let number = if amount < SCIENTIFIC_THRESHOLD {
        format!("{:.2e}", amount)
    } else {
        trim_fraction(format!("{:.6}", amount))
    };

    match symbol {
        Some(symbol) => format!("{} {}", number, symbol),
        None => number,
    }
}

/// Formats a broadcaster fee using the token registry for `chain_id`.
pub fn format_token_fee(chain_id: u64, token_address: &str, raw: &str) -> String {
    let token = tokens::resolve(chain_id, token_address);
    format_fee(raw, token.decimals, token.is_native, token.symbol)
}

fn trim_fraction(mut number: String) -> String {
    if number.contains('.') {
        let trimmed = number.trim_end_matches('0').trim_end_matches('.').len();
        number.truncate(trimmed);
    }
    number
}

/// Shortens `value` to at most `budget` characters by cutting out its middle.
///
/// Strings that already fit are returned unchanged. Otherwise an equal number
/// of leading and trailing characters, `(budget - 3) / 2`, are kept around
/// `"..."`. Budgets too small for the ellipsis keep a plain prefix.
pub fn truncate_middle(value: &str, budget: usize) -> String {
    let len = value.chars().count();
    if len <= budget {
        return value.to_string();
    }
    if budget < ELLIPSIS.len() {
        return value.chars().take(budget).collect();
    }

    let keep = budget.saturating_sub(ELLIPSIS.len()) / 2;
    let prefix: String = value.chars().take(keep).collect();
    let suffix: String = value.chars().skip(len - keep).collect();
    format!("{prefix}{ELLIPSIS}{suffix}")
}

/// Formats a local time as a short time of day.
pub fn time_of_day<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%H:%M:%S").to_string()
}

/// Formats a unix timestamp in milliseconds as a local time of day.
pub fn format_expiration(millis: u64) -> String {
    let Ok(millis) = i64::try_from(millis) else {
        return "Invalid Time".to_string();
    };

    match Local.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => time_of_day(&dt),
        chrono::LocalResult::Ambiguous(dt, _) => time_of_day(&dt),
        chrono::LocalResult::None => "Invalid Time".to_string(),
    }
}

/// Formats a reliability score in `[0, 1]` as a rounded percentage.
pub fn format_reliability(reliability: f64) -> String {
    format!("{}%", (reliability * 100.0).round() as i64)
}
