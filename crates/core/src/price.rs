//! Fixed-point money amounts.
//!
//! Prices are stored as integer minor units (cents) in a `BIGINT` column and
//! travel over the wire as decimal strings, so `234.12` never turns into
//! `234.1199999`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Number of fractional digits carried by a [`Price`].
pub const PRICE_SCALE: u32 = 2;

const CENTS_PER_UNIT: i64 = 10_i64.pow(PRICE_SCALE);

/// A non-negative amount with two fractional digits, held as cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

/// Why a string could not be read as a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceParseError {
    #[error("value is empty")]
    Empty,
    #[error("value is not a number")]
    NotNumeric,
    #[error("value must not be negative")]
    Negative,
    #[error("value has more than {PRICE_SCALE} decimal places")]
    TooPrecise,
    #[error("value is too large")]
    Overflow,
}

impl Price {
    /// Build a price from a cent amount. Returns `None` for negative input.
    pub fn from_cents(cents: i64) -> Option<Self> {
        (cents >= 0).then_some(Self(cents))
    }

    /// Build a price from whole units, e.g. `Price::from_units(100)` is `100.00`.
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(CENTS_PER_UNIT).and_then(Self::from_cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }
}

/// Used when decoding the `price` cents column.
impl TryFrom<i64> for Price {
    type Error = PriceParseError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::from_cents(cents).ok_or(PriceParseError::Negative)
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    /// Exact parse: more than two significant decimals is [`PriceParseError::TooPrecise`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, None)
    }
}

/// Direction [`Price::parse_bound`] takes for digits finer than a cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Toward the next cent; for lower bounds.
    Up,
    /// Toward the previous cent; for upper bounds.
    Down,
}

impl Price {
    pub const MAX: Self = Self(i64::MAX);

    /// Parse an inclusive range bound. Any non-negative decimal is accepted.
    ///
    /// Sub-cent digits are rounded in `rounding`'s direction, which keeps
    /// `price >= bound` / `price <= bound` exact against stored cents.
    /// Amounts past the representable range saturate to [`Price::MAX`].
    pub fn parse_bound(s: &str, rounding: Rounding) -> Result<Self, PriceParseError> {
        match parse_decimal(s, Some(rounding)) {
            Err(PriceParseError::Overflow) => Ok(Self::MAX),
            other => other,
        }
    }
}

fn parse_decimal(s: &str, rounding: Option<Rounding>) -> Result<Price, PriceParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(PriceParseError::Empty);
    }

    let unsigned = match s.strip_prefix('-') {
        Some(rest) => {
            // "-0" and "-0.00" are still zero.
            return if is_decimal_literal(rest) && rest.chars().all(|c| c == '0' || c == '.') {
                Ok(Price(0))
            } else if is_decimal_literal(rest) {
                Err(PriceParseError::Negative)
            } else {
                Err(PriceParseError::NotNumeric)
            };
        }
        None => s.strip_prefix('+').unwrap_or(s),
    };

    if !is_decimal_literal(unsigned) {
        return Err(PriceParseError::NotNumeric);
    }

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };

    // Trailing zeros beyond the scale carry no value ("100.500").
    let fraction = fraction.trim_end_matches('0');
    let (kept, excess) = fraction.split_at(fraction.len().min(PRICE_SCALE as usize));
    let carry = match (excess.is_empty(), rounding) {
        (true, _) | (false, Some(Rounding::Down)) => 0,
        (false, Some(Rounding::Up)) => 1,
        (false, None) => return Err(PriceParseError::TooPrecise),
    };

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| PriceParseError::Overflow)?
    };

    let mut cents_part: i64 = 0;
    for (i, digit) in kept.chars().enumerate() {
        let d = i64::from(digit.to_digit(10).ok_or(PriceParseError::NotNumeric)?);
        cents_part += d * 10_i64.pow(PRICE_SCALE - 1 - i as u32);
    }

    whole
        .checked_mul(CENTS_PER_UNIT)
        .and_then(|c| c.checked_add(cents_part))
        .and_then(|c| c.checked_add(carry))
        .map(Price)
        .ok_or(PriceParseError::Overflow)
}

/// `true` for `123`, `123.45`, `.5` and `5.`; at least one digit, at most one dot.
fn is_decimal_literal(s: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT,
            width = PRICE_SCALE as usize
        )
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
