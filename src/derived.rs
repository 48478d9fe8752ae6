use chrono::{Local, NaiveDate};

use crate::utils::parse_date_dayfirst;

/// Coerce free-form amount text to a number. Strips thousands commas
/// and surrounding whitespace; empty or unparseable input becomes 0.0.
pub fn to_amount(text: &str) -> f64 {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Balance / credit, rounded to two decimals. May be negative when the
/// advance exceeds the rent (no floor at zero).
pub fn balance(rent: f64, advance: f64) -> f64 {
    ((rent - advance) * 100.0).round() / 100.0
}

/// Signed days between `today` and the contract end date, `None` when
/// the end date is blank or unparseable. Negative for contracts that
/// have already expired.
pub fn days_remaining_on(end_date: &str, today: NaiveDate) -> Option<i64> {
    let end = parse_date_dayfirst(end_date)?;
    Some((end - today).num_days())
}

/// `days_remaining_on` against the current local date.
pub fn days_remaining(end_date: &str) -> Option<i64> {
    days_remaining_on(end_date, Local::now().date_naive())
}
