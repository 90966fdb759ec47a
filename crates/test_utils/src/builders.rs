//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out what they check.

use chrono::{DateTime, Utc};
use core_kernel::{AccountType, Amount, ChartId, Currency, NominalCode};
use domain_chart::{Chart, ChartRecord, ChartSettings, ChartTree, LedgerRow};
use domain_journal::{Entry, SimpleTransactionBuilder, SplitTransaction, SplitTransactionBuilder};

use crate::fixtures::{code, TemporalFixtures};

/// Builder for small test charts
///
/// Starts with a `0000` real root; accounts are added beneath existing ones.
pub struct TestChartBuilder {
    name: String,
    currency: Currency,
    settings: ChartSettings,
    rows: Vec<LedgerRow>,
}

impl Default for TestChartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestChartBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test chart".to_string(),
            currency: Currency::GBP,
            settings: ChartSettings::default(),
            rows: vec![LedgerRow::new(None, code("0000"), AccountType::REAL, "COA")],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Adds an account beneath `parent`
    pub fn with_account(mut self, parent: &str, child: &str, account_type: AccountType, name: &str) -> Self {
        self.rows
            .push(LedgerRow::new(Some(code(parent)), code(child), account_type, name));
        self
    }

    /// Sets the stored totals of an account already added
    pub fn with_totals(mut self, account: &str, debit: u64, credit: u64) -> Self {
        let target = code(account);
        if let Some(row) = self.rows.iter_mut().find(|r| r.code == target) {
            row.debit = debit;
            row.credit = credit;
        }
        self
    }

    pub fn build_record(self) -> ChartRecord {
        ChartRecord {
            id: ChartId::new_v7(),
            name: self.name,
            currency: self.currency,
            rows: self.rows,
        }
    }

    /// Builds the chart, panicking if the rows are inconsistent
    pub fn build(self) -> Chart {
        ChartTree::from_rows(&self.rows)
            .and_then(|tree| {
                Chart::new(self.name, self.currency)
                    .with_settings(self.settings)
                    .with_tree(tree)
            })
            .unwrap_or_else(|e| panic!("invalid test chart: {e}"))
    }
}

/// Builder for test transactions against the personal chart
///
/// Defaults the date to [`TemporalFixtures::posting_date`] and the source to
/// `TEST`.
pub struct TestTransactionBuilder {
    date: DateTime<Utc>,
    note: String,
    source: String,
    reference: u64,
}

impl Default for TestTransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTransactionBuilder {
    pub fn new() -> Self {
        Self {
            date: TemporalFixtures::posting_date(),
            note: String::new(),
            source: "TEST".to_string(),
            reference: 0,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_reference(mut self, reference: u64) -> Self {
        self.reference = reference;
        self
    }

    /// Simple transaction debiting `debit` and crediting `credit`
    pub fn simple(self, debit: &str, credit: &str, amount: u64) -> SplitTransaction {
        SimpleTransactionBuilder::new(code(debit), code(credit), Amount::new(amount))
            .with_date(self.date)
            .with_note(self.note)
            .with_source(self.source)
            .with_reference(self.reference)
            .build()
    }

    /// Money received from a sale: bank 1210 against sales 4100
    pub fn sale(self, amount: u64) -> SplitTransaction {
        self.simple("1210", "4100", amount)
    }

    /// Bank charge: expense 6120 against bank 1210
    pub fn bank_charge(self, amount: u64) -> SplitTransaction {
        self.simple("6120", "1210", amount)
    }

    /// Split transaction from (code, amount, type) triples
    pub fn split(self, entries: &[(&str, u64, AccountType)]) -> SplitTransaction {
        let entries = entries.iter().map(|(c, amount, account_type)| {
            Entry::new(code(c), Amount::new(*amount), *account_type)
                .unwrap_or_else(|e| panic!("invalid test entry {c}: {e}"))
        });
        SplitTransactionBuilder::new()
            .with_date(self.date)
            .with_note(self.note)
            .with_source(self.source)
            .with_reference(self.reference)
            .with_entries(entries)
            .build()
    }
}

/// Shorthand for a code list, e.g. when comparing debit accounts
pub fn codes(list: &[&str]) -> Vec<NominalCode> {
    list.iter().map(|c| code(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_builder() {
        let chart = TestChartBuilder::new()
            .with_account("0000", "1000", AccountType::ASSET, "Assets")
            .with_account("1000", "1100", AccountType::BANK, "Bank")
            .with_totals("1100", 50, 20)
            .build();

        assert_eq!(chart.tree().len(), 3);
        assert_eq!(chart.balance(&code("1100")).unwrap(), 30);
    }

    #[test]
    fn test_transaction_builder() {
        let sale = TestTransactionBuilder::new().with_reference(9).sale(100);

        assert!(sale.is_simple());
        assert_eq!(sale.source(), "TEST");
        assert_eq!(sale.reference(), 9);
        assert_eq!(sale.date(), TemporalFixtures::posting_date());
    }
}
