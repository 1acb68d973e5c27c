//! Contact phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains characters other than digits, spaces, `+`, `-`, `(` and `)`.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The number of digits is outside the E.164 range.
    #[error("phone number must have between {min} and {max} digits")]
    DigitCount {
        /// Minimum number of digits.
        min: usize,
        /// Maximum number of digits.
        max: usize,
    },
}

/// An international phone number, stored as its digits only.
///
/// Human formatting such as `+7 (999) 999-99-99` is accepted on input and
/// stripped; messaging deep links (`wa.me`, `tel:`) need the bare digits.
///
/// ## Examples
///
/// ```
/// use dariy_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+7 (999) 999-99-99").unwrap();
/// assert_eq!(phone.digits(), "79999999999");
/// assert_eq!(phone.tel_uri(), "tel:+79999999999");
///
/// assert!(PhoneNumber::parse("").is_err());
/// assert!(PhoneNumber::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits accepted.
    pub const MIN_DIGITS: usize = 7;
    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters that are
    /// not part of a phone number, or has too few or too many digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut digits = String::with_capacity(s.len());
        for ch in s.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '+' | '-' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::DigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the bare digits, country code included.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Returns a `tel:` URI for click-to-call links.
    #[must_use]
    pub fn tel_uri(&self) -> String {
        format!("tel:+{}", self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}
