//! Transaction builders
//!
//! Builders are consumed by `build`, so a built transaction can no longer be
//! changed through its builder.

use chrono::{DateTime, Utc};

use core_kernel::{Amount, NominalCode, TransactionId};

use crate::entry::Entry;
use crate::entry_set::TransactionEntrySet;
use crate::transaction::SplitTransaction;

/// Builder for transactions with any number of entries
///
/// Defaults: no id, the current time, empty note and source, reference 0 and
/// no entries.
#[derive(Debug, Clone)]
pub struct SplitTransactionBuilder {
    txn: SplitTransaction,
}

impl Default for SplitTransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitTransactionBuilder {
    pub fn new() -> Self {
        Self {
            txn: SplitTransaction {
                id: None,
                date: Utc::now(),
                note: String::new(),
                source: String::new(),
                reference: 0,
                entries: TransactionEntrySet::new(),
            },
        }
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.txn.id = Some(id);
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.txn.date = date;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.txn.note = note.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.txn.source = source.into();
        self
    }

    pub fn with_reference(mut self, reference: u64) -> Self {
        self.txn.reference = reference;
        self
    }

    /// Appends one entry
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.txn.entries.push(entry);
        self
    }

    /// Appends entries, keeping their order
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = Entry>) -> Self {
        self.txn.entries.extend(entries);
        self
    }

    pub fn build(self) -> SplitTransaction {
        self.txn
    }
}

/// Builder for a two-entry transaction moving `amount` from one account to another
///
/// The debit and credit entries are seeded at construction; only the header
/// fields can be changed afterwards.
#[derive(Debug, Clone)]
pub struct SimpleTransactionBuilder {
    inner: SplitTransactionBuilder,
}

impl SimpleTransactionBuilder {
    pub fn new(debit: NominalCode, credit: NominalCode, amount: Amount) -> Self {
        Self {
            inner: SplitTransactionBuilder::new()
                .with_entry(Entry::debit(debit, amount))
                .with_entry(Entry::credit(credit, amount)),
        }
    }

    pub fn with_id(self, id: TransactionId) -> Self {
        Self {
            inner: self.inner.with_id(id),
        }
    }

    pub fn with_date(self, date: DateTime<Utc>) -> Self {
        Self {
            inner: self.inner.with_date(date),
        }
    }

    pub fn with_note(self, note: impl Into<String>) -> Self {
        Self {
            inner: self.inner.with_note(note),
        }
    }

    pub fn with_source(self, source: impl Into<String>) -> Self {
        Self {
            inner: self.inner.with_source(source),
        }
    }

    pub fn with_reference(self, reference: u64) -> Self {
        Self {
            inner: self.inner.with_reference(reference),
        }
    }

    pub fn build(self) -> SplitTransaction {
        self.inner.build()
    }
}
