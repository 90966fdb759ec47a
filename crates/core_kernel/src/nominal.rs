//! Nominal codes
//!
//! A nominal code identifies an account within one chart. It is a string of
//! one to ten ASCII digits and is compared as a string, so `"0001"` and `"1"`
//! are different codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Maximum number of digits in a nominal code
pub const MAX_NOMINAL_DIGITS: usize = 10;

/// A validated account nominal code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NominalCode(String);

impl NominalCode {
    /// Parses a nominal code
    ///
    /// # Errors
    ///
    /// Returns `InvalidNominalCode` unless `code` is 1 to 10 ASCII digits
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        if code.is_empty()
            || code.len() > MAX_NOMINAL_DIGITS
            || !code.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(CoreError::InvalidNominalCode(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits, including leading zeros
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Numeric value of the code; leading zeros are ignored
    pub fn numeric_value(&self) -> u64 {
        // ten digits always fit in a u64
        self.0.bytes().fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'))
    }
}

impl fmt::Display for NominalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NominalCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NominalCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NominalCode {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Plain decimal rendering; every `u32` fits in ten digits
impl From<u32> for NominalCode {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<NominalCode> for String {
    fn from(code: NominalCode) -> String {
        code.0
    }
}

impl AsRef<str> for NominalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NominalCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NominalCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
