//! Exact decimal prices
//!
//! Listing prices are shown with locale noise (`"1 234,56 zł"`). They are
//! cleaned and kept as an exact non-negative decimal so that two equal prices
//! always compare and hash equal.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a price
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("Price text '{0}' contains no digits")]
    Empty(String),

    #[error("Price text '{0}' is not a decimal number")]
    Malformed(String),

    #[error("Price text '{0}' is too large")]
    Overflow(String),
}

/// A non-negative decimal amount stored as `mantissa / 10^scale`
///
/// The value is normalized (no trailing fractional zeros), so `12.50` and
/// `12.5` are the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Price {
    mantissa: u64,
    scale: u32,
}

impl Price {
    /// Builds a price from minor units with two decimal places
    pub fn from_cents(cents: u64) -> Self {
        Self {
            mantissa: cents,
            scale: 2,
        }
        .normalized()
    }

    /// Parses price text as displayed on a listing row
    ///
    /// Commas become decimal points and every character that is neither a
    /// digit nor a dot is dropped before parsing.
    ///
    /// # Example
    ///
    /// ```
    /// use shelf_crawler::Price;
    ///
    /// let price = Price::from_listing_text("1 234,56 zł").unwrap();
    /// assert_eq!(price.to_string(), "1234.56");
    /// ```
    pub fn from_listing_text(raw: &str) -> Result<Self, PriceError> {
        let cleaned: String = raw
            .replace(',', ".")
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        if !cleaned.chars().any(|c| c.is_ascii_digit()) {
            return Err(PriceError::Empty(raw.to_string()));
        }

        cleaned.parse().map_err(|e| match e {
            PriceError::Malformed(_) => PriceError::Malformed(raw.to_string()),
            PriceError::Overflow(_) => PriceError::Overflow(raw.to_string()),
            other => other,
        })
    }

    /// Integer mantissa of the normalized value
    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// Number of fractional digits of the normalized value
    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn normalized(mut self) -> Self {
        while self.scale > 0 && self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.scale -= 1;
        }
        if self.mantissa == 0 {
            self.scale = 0;
        }
        self
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(PriceError::Empty(s.to_string()));
        }

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(PriceError::Malformed(s.to_string()));
        }

        let mut mantissa: u64 = 0;
        for digit in whole.chars().chain(fraction.chars()) {
            let value = u64::from(digit as u8 - b'0');
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(value))
                .ok_or_else(|| PriceError::Overflow(s.to_string()))?;
        }

        let scale =
            u32::try_from(fraction.len()).map_err(|_| PriceError::Overflow(s.to_string()))?;

        Ok(Self { mantissa, scale }.normalized())
    }
}

impl fmt::Display for Price {
    /// Formats with at least two fractional digits, as prices are shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.scale.max(2) as usize;
        let padding = scale - self.scale as usize;
        let digits = format!("{}{}", self.mantissa, "0".repeat(padding));
        let digits = format!("{:0>width$}", digits, width = scale + 1);
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        write!(f, "{}.{}", whole, fraction)
    }
}
