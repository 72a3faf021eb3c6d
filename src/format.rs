//! Quantity formatters for amounts, durations, timestamps and counts.
//!
//! Amounts are converted with `rust_decimal`, never through floating point.

use crate::models::{Amount, DurationSeconds, UnixSeconds};
use chrono::DateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the contribution token (USDC)
pub const USDC_DECIMALS: u32 = 6;

/// Base units per whole token
pub const USDC_UNIT: Amount = 1_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Sentinel for a missing detail-view timestamp
pub const NO_TIMESTAMP: &str = "--";

/// Sentinel for a tanda that has not started, on listing cards
pub const NOT_STARTED: &str = "Not started";

/// Exact decimal value of a base-unit amount, `None` beyond `Decimal`'s range
pub fn to_decimal(amount: Amount) -> Option<Decimal> {
    let signed = i128::try_from(amount).ok()?;
    Decimal::try_from_i128_with_scale(signed, USDC_DECIMALS).ok()
}

/// Full-precision token amount with trailing zeros trimmed: `10_500_000 -> "10.5"`
pub fn format_usdc(amount: Option<Amount>) -> String {
    let amount = match amount {
        Some(a) if a > 0 => a,
        _ => return "0".to_string(),
    };

    match to_decimal(amount) {
        Some(d) => d.normalize().to_string(),
        None => format_units_exact(amount, USDC_DECIMALS),
    }
}

/// Whole-token amount, rounding half away from zero
pub fn format_usdc_whole(amount: Amount) -> String {
    match to_decimal(amount) {
        Some(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => {
            let unit = 10u128.pow(USDC_DECIMALS);
            let whole = amount / unit;
            let rounded = if amount % unit >= unit / 2 { whole.saturating_add(1) } else { whole };
            rounded.to_string()
        }
    }
}

/// Integer-only rendering for amounts too large for `Decimal`
fn format_units_exact(amount: Amount, decimals: u32) -> String {
    let unit = 10u128.pow(decimals);
    let whole = amount / unit;
    let frac = amount % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parse a human token amount ("12.5") into base units, exactly
pub fn parse_usdc(input: &str) -> Option<Amount> {
    let value: Decimal = input.trim().parse().ok()?;
    if value.is_sign_negative() {
        return None;
    }
    let scaled = value.checked_mul(Decimal::from(USDC_UNIT as u64))?;
    if scaled.fract() != Decimal::ZERO {
        return None;
    }
    scaled.trunc().to_u128()
}

/// Exact number of days in a duration
pub fn seconds_to_days(seconds: Option<DurationSeconds>) -> Decimal {
    match seconds {
        Some(s) if s > 0 => Decimal::from(s) / Decimal::from(SECONDS_PER_DAY),
        _ => Decimal::ZERO,
    }
}

/// Days with at most two decimals: `129600 -> "1.5"`
pub fn format_days(seconds: Option<DurationSeconds>) -> String {
    seconds_to_days(seconds)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Whole days, rounding half away from zero
pub fn format_days_whole(seconds: DurationSeconds) -> String {
    seconds_to_days(Some(seconds))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Date and time in UTC, or `"--"` when absent or zero
pub fn format_timestamp(timestamp: Option<UnixSeconds>) -> String {
    render_timestamp(timestamp, "%Y-%m-%d %H:%M:%S UTC").unwrap_or_else(|| NO_TIMESTAMP.to_string())
}

/// Calendar date in UTC, or `"Not started"` when zero
pub fn format_date(timestamp: UnixSeconds) -> String {
    render_timestamp(Some(timestamp), "%Y-%m-%d").unwrap_or_else(|| NOT_STARTED.to_string())
}

fn render_timestamp(timestamp: Option<UnixSeconds>, pattern: &str) -> Option<String> {
    let ts = timestamp.filter(|t| *t > 0)?;
    let dt = DateTime::from_timestamp(i64::try_from(ts).ok()?, 0)?;
    Some(dt.format(pattern).to_string())
}

/// Integer display with `"0"` for unresolved values
pub fn format_count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_string()
}
