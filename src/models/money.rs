//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that the amounts typed into a
//! form survive parsing and formatting exactly. Provides the locale-aware
//! display parser and formatter used by the transaction and budget forms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::locale::CurrencyLocale;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use tally::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a decimal value, rounding to the nearest cent
    ///
    /// Halves round away from zero. Returns `None` for non-finite values and
    /// for amounts whose cent count does not fit in an i64.
    pub fn try_from_decimal(value: f64) -> Option<Self> {
        // 2^63 is exactly representable; i64::MAX is not
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;

        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents >= LIMIT || cents < -LIMIT {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The amount as a decimal number of units
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Format using the given locale's symbol, grouping and decimal separator
    pub fn format(&self, locale: &CurrencyLocale) -> String {
        format_currency(*self, locale)
    }
}

/// Parse a display string (as typed into a masked currency input) into cents
///
/// Every character that is not an ASCII digit is discarded and the digits
/// that remain are read as a number of cents. Symbols, separators and signs
/// are all ignored, so the result is never negative. Input without any
/// digits parses to zero.
///
/// # Examples
/// ```
/// use tally::models::money::parse_currency;
/// assert_eq!(parse_currency("R$ 1.234,56").unwrap().cents(), 123456);
/// assert_eq!(parse_currency("").unwrap().cents(), 0);
/// ```
pub fn parse_currency(display: &str) -> Result<Money, MoneyParseError> {
    let mut cents: i64 = 0;
    for digit in display.chars().filter_map(|c| c.to_digit(10)) {
        cents = cents
            .checked_mul(10)
            .and_then(|c| c.checked_add(digit as i64))
            .ok_or_else(|| MoneyParseError::Overflow(display.to_string()))?;
    }
    Ok(Money(cents))
}

/// Render an amount with locale grouping and exactly two fraction digits
///
/// # Examples
/// ```
/// use tally::models::{money::format_currency, CurrencyLocale, Money};
/// let pt = CurrencyLocale::pt_br();
/// assert_eq!(format_currency(Money::from_cents(123456), &pt), "R$ 1.234,56");
/// ```
pub fn format_currency(amount: Money, locale: &CurrencyLocale) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let abs = amount.0.unsigned_abs();
    let units = locale.group_digits(&(abs / 100).to_string());
    let space = if locale.symbol_spacing { " " } else { "" };

    format!(
        "{}{}{}{}{}{:02}",
        sign,
        locale.symbol,
        space,
        units,
        locale.decimal_separator,
        abs % 100
    )
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_currency(*self, &CurrencyLocale::default()))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    /// More digits than fit in the cents counter
    Overflow(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Overflow(s) => write!(f, "Amount too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
