//! Amount and currency types
//!
//! Ledger amounts are unsigned integers in the minor unit of the chart's
//! currency (pence, cents). Conversion to major units for presentation goes
//! through rust_decimal so no floating point is ever involved.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    GBP,
    USD,
    EUR,
    JPY,
    CHF,
    AUD,
    CAD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "£",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GBP" => Ok(Currency::GBP),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "AUD" => Ok(Currency::AUD),
            "CAD" => Ok(Currency::CAD),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during amount operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// An unsigned ledger amount in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from minor units
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount in minor units
    pub const fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition, failing on overflow
    pub fn checked_add(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction, failing when the result would be negative
    pub fn checked_sub(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(MoneyError::Overflow)
    }

    /// Converts to a decimal value in the currency's major unit
    ///
    /// ```rust,ignore
    /// assert_eq!(Amount::new(12345).to_major(Currency::GBP), dec!(123.45));
    /// ```
    pub fn to_major(&self, currency: Currency) -> Decimal {
        Decimal::from(self.0) / Decimal::from(10_u64.pow(currency.decimal_places()))
    }

    /// Converts a major-unit decimal into minor units
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the value is negative or has more precision than
    ///   the currency allows
    /// - `Overflow` if the value does not fit in 64 bits of minor units
    pub fn from_major(value: Decimal, currency: Currency) -> Result<Amount, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::InvalidAmount(format!("{value} is negative")));
        }
        let minor = value
            .checked_mul(Decimal::from(10_u64.pow(currency.decimal_places())))
            .ok_or(MoneyError::Overflow)?;
        if minor.fract() != Decimal::ZERO {
            return Err(MoneyError::InvalidAmount(format!(
                "{value} has more than {} decimal places",
                currency.decimal_places()
            )));
        }
        minor.to_u64().map(Amount).ok_or(MoneyError::Overflow)
    }

    /// Formats the amount in major units with the currency symbol
    pub fn display_in(&self, currency: Currency) -> String {
        let dp = currency.decimal_places() as usize;
        format!("{}{:.dp$}", currency.symbol(), self.to_major(currency), dp = dp)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Amount> for u64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl From<Amount> for i128 {
    fn from(value: Amount) -> Self {
        value.0 as i128
    }
}
