//! Split transactions
//!
//! A split transaction posts any number of debit and credit entries that
//! together balance. The common two-entry case is a "simple" transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, NominalCode, TransactionId};

use crate::entry::Entry;
use crate::entry_set::TransactionEntrySet;
use crate::error::JournalError;

/// A journal transaction, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTransaction {
    pub(crate) id: Option<TransactionId>,
    pub(crate) date: DateTime<Utc>,
    pub(crate) note: String,
    pub(crate) source: String,
    pub(crate) reference: u64,
    pub(crate) entries: TransactionEntrySet,
}

impl SplitTransaction {
    /// Id assigned by the store; `None` until written
    pub fn id(&self) -> Option<TransactionId> {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Originating system or document type
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Caller reference, e.g. an invoice number
    pub fn reference(&self) -> u64 {
        self.reference
    }

    pub fn entries(&self) -> &TransactionEntrySet {
        &self.entries
    }

    /// Returns a copy carrying the id a store assigned
    pub fn with_assigned_id(&self, id: TransactionId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn check_balance(&self) -> bool {
        self.entries.check_balance()
    }

    /// The transaction amount: half the sum of all entries
    ///
    /// # Errors
    ///
    /// - `UnbalancedTransaction` if debits and credits differ
    /// - `Overflow` if the amount does not fit in an [`Amount`]
    pub fn amount(&self) -> Result<Amount, JournalError> {
        let (debits, credits) = (self.entries.debit_total(), self.entries.credit_total());
        if !self.check_balance() {
            return Err(JournalError::UnbalancedTransaction { debits, credits });
        }
        let total = debits + credits;
        u64::try_from(total / 2)
            .map(Amount::new)
            .map_err(|_| JournalError::Overflow)
    }

    /// Codes of debit entries, in entry order
    pub fn debit_accounts(&self) -> Vec<&NominalCode> {
        self.entries.debits().into_iter().map(Entry::code).collect()
    }

    /// Codes of credit entries, in entry order
    pub fn credit_accounts(&self) -> Vec<&NominalCode> {
        self.entries.credits().into_iter().map(Entry::code).collect()
    }

    /// Exactly one debit entry and one credit entry, whatever their amounts
    pub fn is_simple(&self) -> bool {
        self.entries.debits().len() == 1 && self.entries.credits().len() == 1
    }

    /// The single entry posted to `code`
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when no entry or more than one entry carries
    /// `code`.
    pub fn entry(&self, code: &NominalCode) -> Result<&Entry, JournalError> {
        match self.entries.filter(|e| e.code() == code).as_slice() {
            [entry] => Ok(*entry),
            matches => Err(JournalError::entry_not_found(code, matches.len())),
        }
    }

    /// Checks the transaction can be posted
    ///
    /// # Errors
    ///
    /// - `TooFewEntries` with fewer than two entries
    /// - `UnbalancedTransaction` if debits and credits differ
    pub fn validate(&self) -> Result<(), JournalError> {
        if self.entries.len() < 2 {
            return Err(JournalError::TooFewEntries(self.entries.len()));
        }
        self.amount().map(|_| ())
    }
}
