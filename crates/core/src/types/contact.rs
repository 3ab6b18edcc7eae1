//! Messaging contact number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ContactNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactNumberError {
    /// The input string is empty.
    #[error("contact number cannot be empty")]
    Empty,
    /// The input contains something other than digits.
    #[error("contact number must contain only digits (got {0:?})")]
    InvalidCharacter(char),
    /// The input is longer than an E.164 number.
    #[error("contact number must be at most {max} digits")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A WhatsApp contact number in international format, digits only.
///
/// `wa.me` links take the number without a leading `+`, so parsing strips
/// it along with any whitespace.
///
/// ## Examples
///
/// ```
/// use bonprix_core::ContactNumber;
///
/// let number = ContactNumber::parse("+224 621 82 21 34").unwrap();
/// assert_eq!(number.as_str(), "224621822134");
///
/// assert!(ContactNumber::parse("").is_err());
/// assert!(ContactNumber::parse("call-me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Maximum number of digits (E.164).
    pub const MAX_LENGTH: usize = 15;

    /// Parse a `ContactNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 15 digits, or
    /// contains characters other than digits, whitespace and a leading `+`.
    pub fn parse(s: &str) -> Result<Self, ContactNumberError> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let mut digits = String::with_capacity(body.len());
        for c in body.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if !c.is_whitespace() {
                return Err(ContactNumberError::InvalidCharacter(c));
            }
        }

        if digits.is_empty() {
            return Err(ContactNumberError::Empty);
        }
        if digits.len() > Self::MAX_LENGTH {
            return Err(ContactNumberError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ContactNumber {
    type Err = ContactNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
