//! Journal domain errors

use core_kernel::{CoreError, NominalCode};
use thiserror::Error;

/// Errors that can occur in the journal domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JournalError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Debit and credit sides differ
    #[error("Unbalanced transaction: debits={debits}, credits={credits}")]
    UnbalancedTransaction { debits: u128, credits: u128 },

    /// Lookup by code found no entry, or more than one
    #[error("Entry not found for {code} ({matches} matches)")]
    EntryNotFound { code: NominalCode, matches: usize },

    /// A transaction needs at least two entries
    #[error("Transaction has {0} entries, at least 2 are required")]
    TooFewEntries(usize),

    /// Transaction amount does not fit in an amount
    #[error("Transaction amount overflow")]
    Overflow,
}

impl JournalError {
    pub fn entry_not_found(code: &NominalCode, matches: usize) -> Self {
        JournalError::EntryNotFound {
            code: code.clone(),
            matches,
        }
    }
}
