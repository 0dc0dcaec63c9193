use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency used to display amounts.
///
/// The app is mono-currency: one currency is picked at startup (default
/// Honduran lempira) and every amount on screen is formatted with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Hnl,
    Usd,
    Eur,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported currency: {0}")]
pub struct UnsupportedCurrency(pub String);

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Hnl => "HNL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Hnl => "L",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Whether the symbol is separated from the digits by a space.
    const fn spaced(self) -> bool {
        matches!(self, Currency::Hnl)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = UnsupportedCurrency;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HNL" => Ok(Currency::Hnl),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Signed money amount represented as **integer cents**.
///
/// ```rust
/// use screens::{Currency, Money};
///
/// let amount = Money::from_major(7000.77);
/// assert_eq!(amount.cents(), 700_077);
/// assert_eq!(amount.format(Currency::Hnl), "L 7,000.77");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Rounds a major-unit amount (e.g. `12.345`) to the nearest cent.
    ///
    /// Non-finite input maps to zero.
    #[must_use]
    pub fn from_major(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::ZERO;
        }
        Self((amount * 100.0).round() as i64)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Formats with thousands grouping, two fraction digits and the currency
    /// symbol, e.g. `L 1,500.50` or `-$3.00`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = group_thousands(&(abs / 100).to_string());
        with_symbol(sign, &format!("{units}.{:02}", abs % 100), currency)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

fn with_symbol(sign: &str, amount: &str, currency: Currency) -> String {
    let space = if currency.spaced() { " " } else { "" };
    format!("{sign}{}{space}{amount}", currency.symbol())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount received from the backend.
///
/// Works on the float itself, so amounts past the range of [`Money`] keep
/// every digit. Non-finite input formats as zero.
#[must_use]
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (units, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    with_symbol(sign, &format!("{}.{cents}", group_thousands(units)), currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hnl_with_grouping() {
        assert_eq!(format_currency(7000.77, Currency::Hnl), "L 7,000.77");
        assert_eq!(format_currency(0.0, Currency::Hnl), "L 0.00");
        assert_eq!(format_currency(1234567.5, Currency::Hnl), "L 1,234,567.50");
        assert_eq!(format_currency(999.999, Currency::Hnl), "L 1,000.00");
    }

    #[test]
    fn formats_negative_and_other_currencies() {
        assert_eq!(format_currency(-5.0, Currency::Hnl), "-L 5.00");
        assert_eq!(format_currency(1500.5, Currency::Usd), "$1,500.50");
        assert_eq!(format_currency(10.0, Currency::Eur), "€10.00");
    }

    #[test]
    fn formatting_is_stable() {
        let first = format_currency(42.1, Currency::Hnl);
        let second = format_currency(42.1, Currency::Hnl);
        assert_eq!(first, second);
        assert_eq!(first, "L 42.10");
    }

    #[test]
    fn large_amounts_keep_every_digit() {
        assert_eq!(
            format_currency(1e20, Currency::Hnl),
            "L 100,000,000,000,000,000,000.00"
        );
        assert_eq!(
            format_currency(-1e18, Currency::Usd),
            "-$1,000,000,000,000,000,000.00"
        );
    }

    #[test]
    fn tiny_negative_rounds_to_unsigned_zero() {
        assert_eq!(format_currency(-0.001, Currency::Hnl), "L 0.00");
    }

    #[test]
    fn money_format_matches_float_format() {
        assert_eq!(Money::new(700077).format(Currency::Hnl), "L 7,000.77");
        assert_eq!(Money::new(-300).format(Currency::Usd), "-$3.00");
    }

    #[test]
    fn non_finite_formats_as_zero() {
        assert_eq!(format_currency(f64::NAN, Currency::Usd), "$0.00");
    }

    #[test]
    fn currency_from_code() {
        assert_eq!(Currency::try_from(" hnl "), Ok(Currency::Hnl));
        assert_eq!(
            Currency::try_from("jpy"),
            Err(UnsupportedCurrency("JPY".to_string()))
        );
    }
}
