//! Ordered entry sets

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// The entries of one transaction, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionEntrySet(Vec<Entry>);

impl TransactionEntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when debits and credits net to zero
    ///
    /// Debit entries count negative and credit entries positive.
    pub fn check_balance(&self) -> bool {
        let net = self.0.iter().fold(0i128, |net, entry| {
            let amount = i128::from(entry.amount().value());
            if entry.is_debit() {
                net - amount
            } else {
                net + amount
            }
        });
        net == 0
    }

    /// Entries matching `predicate`, in order
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Entry>
    where
        P: FnMut(&Entry) -> bool,
    {
        self.0.iter().filter(|entry| predicate(entry)).collect()
    }

    pub fn debits(&self) -> Vec<&Entry> {
        self.filter(Entry::is_debit)
    }

    pub fn credits(&self) -> Vec<&Entry> {
        self.filter(Entry::is_credit)
    }

    /// Sum of debit entries; wide enough that it cannot overflow
    pub fn debit_total(&self) -> u128 {
        self.debits().iter().map(|e| u128::from(e.amount().value())).sum()
    }

    /// Sum of credit entries; wide enough that it cannot overflow
    pub fn credit_total(&self) -> u128 {
        self.credits().iter().map(|e| u128::from(e.amount().value())).sum()
    }
}

impl From<Vec<Entry>> for TransactionEntrySet {
    fn from(entries: Vec<Entry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<Entry> for TransactionEntrySet {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Entry> for TransactionEntrySet {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TransactionEntrySet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
