//! Chart domain errors

use core_kernel::{AccountType, CoreError, NominalCode};
use thiserror::Error;

/// Errors that can occur in the chart domain
#[derive(Debug, Error)]
pub enum ChartError {
    /// A value-level failure (bad nominal code, unknown type name, ...)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(NominalCode),

    /// Parent account not found when linking a child
    #[error("Parent account not found: {0}")]
    ParentNotFound(NominalCode),

    /// Account code already used in this chart
    #[error("Account already exists: {0}")]
    DuplicateCode(NominalCode),

    /// Display name already used in a chart that requires unique names
    #[error("Account name already in use: {0}")]
    DuplicateName(String),

    /// Chart rows or definitions did not start with a root account
    #[error("Chart has no root account")]
    MissingRoot,

    /// A second root was offered to a chart that already has one
    #[error("Chart already has a root account: {0}")]
    RootAlreadySet(NominalCode),

    /// Account (or one of its descendants) still carries totals
    #[error("Account {code} has non-zero totals: debit={debit}, credit={credit}")]
    AccountHasBalance {
        code: NominalCode,
        debit: u64,
        credit: u64,
    },

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ChartError {
    pub fn not_found(code: &NominalCode) -> Self {
        ChartError::AccountNotFound(code.clone())
    }

    pub fn parent_not_found(code: &NominalCode) -> Self {
        ChartError::ParentNotFound(code.clone())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ChartError::AccountNotFound(_) | ChartError::ParentNotFound(_))
    }
}

/// Charts only hold named account types
pub(crate) fn ensure_named(account_type: AccountType) -> Result<(), ChartError> {
    if account_type.is_dummy() {
        return Err(CoreError::DummyAccountType.into());
    }
    Ok(())
}
