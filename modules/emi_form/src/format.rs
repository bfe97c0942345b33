//! Currency formatting for the result panel.

use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;

/// Digit grouping of the integer part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Last three digits, then pairs: `1,10,747`
    #[default]
    Indian,
    /// Groups of three: `110,747`
    International,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
    grouping: Grouping,
    placeholder: String,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for CurrencyFormatter {
    fn from(config: &DisplayConfig) -> Self {
        Self::new(
            config.currency_symbol.clone(),
            config.grouping,
            config.placeholder.clone(),
        )
    }
}

impl CurrencyFormatter {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        grouping: Grouping,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
            placeholder: placeholder.into(),
        }
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Two fractional digits, grouped, after the symbol and a space.
    ///
    /// Absent and non-finite values render as the placeholder.
    #[must_use]
    pub fn format(&self, value: Option<f64>) -> String {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return self.placeholder.clone();
        };

        // Ties round away from zero
        let cents = (value.abs() * 100.0).round() / 100.0;
        let fixed = if cents.is_finite() {
            format!("{cents:.2}")
        } else {
            format!("{:.2}", value.abs())
        };
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };
        let amount = format!("{sign}{}.{frac_part}", group_digits(int_part, self.grouping));

        if self.symbol.is_empty() {
            amount
        } else {
            format!("{} {amount}", self.symbol)
        }
    }
}

/// Format with the default symbol, grouping and placeholder.
#[must_use]
pub fn format_currency(value: Option<f64>) -> String {
    CurrencyFormatter::default().format(value)
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let width = match grouping {
        Grouping::Indian => 2,
        Grouping::International => 3,
    };

    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > width {
        let (front, group) = rest.split_at(rest.len() - width);
        groups.push(group);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    groups.push(last_three);
    groups.join(",")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::non_ascii_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        assert_eq!(format_currency(Some(1234.5)), "₹ 1,234.50");
        assert_eq!(format_currency(None), "-");
    }

    #[test]
    fn test_indian_grouping() {
        let f = CurrencyFormatter::default();
        assert_eq!(f.format(Some(110_747.76)), "₹ 1,10,747.76");
        assert_eq!(f.format(Some(12_345_678.9)), "₹ 1,23,45,678.90");
        assert_eq!(f.format(Some(999.0)), "₹ 999.00");
        assert_eq!(f.format(Some(0.0)), "₹ 0.00");
    }

    #[test]
    fn test_international_grouping() {
        let f = CurrencyFormatter::new("$", Grouping::International, "n/a");
        assert_eq!(f.format(Some(110_747.76)), "$ 110,747.76");
        assert_eq!(f.format(Some(12_345_678.9)), "$ 12,345,678.90");
        assert_eq!(f.format(None), "n/a");
    }

    #[test]
    fn test_negative_and_non_finite() {
        let f = CurrencyFormatter::default();
        assert_eq!(f.format(Some(-1234.5)), "₹ -1,234.50");
        assert_eq!(f.format(Some(-0.001)), "₹ 0.00");
        assert_eq!(f.format(Some(f64::NAN)), "-");
        assert_eq!(f.format(Some(f64::INFINITY)), "-");
    }

    #[test]
    fn test_rounds_to_two_digits() {
        let f = CurrencyFormatter::new("", Grouping::Indian, "-");
        assert_eq!(f.format(Some(4614.494)), "4,614.49");
        assert_eq!(f.format(Some(0.5)), "0.50");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        let f = CurrencyFormatter::default();
        assert_eq!(f.format(Some(0.125)), "₹ 0.13");
        assert_eq!(f.format(Some(1000.625)), "₹ 1,000.63");
        assert_eq!(f.format(Some(0.375)), "₹ 0.38");
        assert_eq!(f.format(Some(-0.125)), "₹ -0.13");
    }
}
