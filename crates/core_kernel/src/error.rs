//! Core error types used across the system

use thiserror::Error;
use crate::money::MoneyError;

/// Core error type for the kernel
///
/// All variants are deterministic: the kernel performs no I/O, so none of
/// these failures can succeed on retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid nominal code {0:?}: expected 1 to 10 digits")]
    InvalidNominalCode(String),

    #[error("Unknown account type: {0}")]
    UnknownAccountType(String),

    #[error("No operations available on the dummy account type")]
    DummyAccountType,

    #[error("Cannot determine balance type for account type bits {0:#b}")]
    UnknownBalanceType(u16),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl CoreError {
    pub fn invalid_nominal(code: impl Into<String>) -> Self {
        CoreError::InvalidNominalCode(code.into())
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        CoreError::UnknownAccountType(name.into())
    }
}
