//! Display helpers for amounts, dates and chart bars.

use chrono::NaiveDate;

use crate::cli::context::CommandError;

const BAR_WIDTH: usize = 32;

/// `4500.0` with symbol `$` renders as `$4,500.00`; negatives lead with `-`.
pub fn format_money(value: f64, symbol: &str) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{fraction:02}")
}

pub fn format_rate(rate: f64) -> String {
    format!("{}%", rate)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

/// Shows the first four characters of a credential.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".into()
    } else {
        format!("{}****", visible)
    }
}

/// Horizontal bar proportional to `value / max`.
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(28700.0, "$"), "$28,700.00");
        assert_eq!(format_money(4500.5, "$"), "$4,500.50");
        assert_eq!(format_money(999.999, "€"), "€1,000.00");
        assert_eq!(format_money(0.0, "$"), "$0.00");
        assert_eq!(format_money(-1300.0, "$"), "-$1,300.00");
        assert_eq!(format_money(1234567.0, "$"), "$1,234,567.00");
    }

    #[test]
    fn secrets_are_masked() {
        assert_eq!(mask_secret("AIzaSyExample"), "AIza****");
        assert_eq!(mask_secret("abc"), "****");
    }

    #[test]
    fn bars_scale_to_maximum() {
        assert_eq!(bar(50.0, 100.0).chars().count(), 16);
        assert_eq!(bar(100.0, 100.0).chars().count(), 32);
        assert_eq!(bar(0.0, 100.0), "");
        assert_eq!(bar(0.01, 100.0).chars().count(), 1);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("2024-02-30").is_err());
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
