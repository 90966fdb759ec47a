//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data shared across the chart and journal tests.
//! The sample chart is a small personal ledger:
//!
//! ```text
//! 0000 COA (real)
//! ├── 0001 Balance Sheet (dr)
//! │   ├── 1000 Assets (asset)
//! │   │   ├── 1100 Current Assets (asset)
//! │   │   │   └── 1200 Bank (bank)
//! │   │   │       └── 1210 Current Account (bank)
//! │   │   └── 1300 Debtors (customer)
//! │   ├── 2000 Liabilities (liability)
//! │   │   └── 2100 Creditors (supplier)
//! │   └── 3000 Equity (equity)
//! └── 0002 Profit And Loss (cr)
//!     ├── 4000 Income (income)
//!     │   └── 4100 Sales (income)
//!     └── 6000 Expenses (expense)
//!         └── 6100 Overheads (expense)
//!             └── 6120 Bank Charges (expense)
//! ```

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{Amount, ChartId, Currency, NominalCode};
use domain_chart::{Chart, ChartDefinition, ChartRecord, LedgerRow};
use rust_decimal_macros::dec;

/// Parses a nominal code, panicking on bad test input
pub fn code(s: &str) -> NominalCode {
    NominalCode::new(s).unwrap_or_else(|e| panic!("bad fixture code {s:?}: {e}"))
}

/// Fixture for the sample personal chart
pub struct ChartFixtures;

impl ChartFixtures {
    /// (parent, code, type, name) in pre-order
    const PERSONAL: [(&'static str, &'static str, &'static str, &'static str); 16] = [
        ("", "0000", "real", "COA"),
        ("0000", "0001", "dr", "Balance Sheet"),
        ("0001", "1000", "asset", "Assets"),
        ("1000", "1100", "asset", "Current Assets"),
        ("1100", "1200", "bank", "Bank"),
        ("1200", "1210", "bank", "Current Account"),
        ("1000", "1300", "customer", "Debtors"),
        ("0001", "2000", "liability", "Liabilities"),
        ("2000", "2100", "supplier", "Creditors"),
        ("0001", "3000", "equity", "Equity"),
        ("0000", "0002", "cr", "Profit And Loss"),
        ("0002", "4000", "income", "Income"),
        ("4000", "4100", "income", "Sales"),
        ("0002", "6000", "expense", "Expenses"),
        ("6000", "6100", "expense", "Overheads"),
        ("6100", "6120", "expense", "Bank Charges"),
    ];

    /// Rows of the personal chart with zero totals
    pub fn personal_rows() -> Vec<LedgerRow> {
        Self::PERSONAL
            .iter()
            .map(|(parent, code, type_name, name)| {
                LedgerRow::parse(parent, code, type_name, name, 0, 0)
                    .unwrap_or_else(|e| panic!("bad fixture row {code}: {e}"))
            })
            .collect()
    }

    /// The personal chart as a nested definition
    pub fn personal_definition() -> ChartDefinition {
        fn nest(parent: &str) -> Vec<ChartDefinition> {
            ChartFixtures::PERSONAL
                .iter()
                .filter(|(p, ..)| *p == parent)
                .map(|(_, code, type_name, name)| ChartDefinition {
                    code: code.to_string(),
                    account_type: type_name.to_string(),
                    name: name.to_string(),
                    children: nest(code),
                })
                .collect()
        }

        nest("")
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("personal chart has no root"))
    }

    /// Stored record for the personal chart
    pub fn personal_record(name: &str) -> ChartRecord {
        ChartRecord {
            id: ChartId::new_v7(),
            name: name.to_string(),
            currency: Currency::GBP,
            rows: Self::personal_rows(),
        }
    }

    /// The personal chart as a domain chart
    pub fn personal_chart() -> Chart {
        Chart::from_record(&Self::personal_record("Personal"))
            .unwrap_or_else(|e| panic!("personal chart fixture is invalid: {e}"))
    }

    /// A root-only chart
    pub fn empty_chart() -> Chart {
        Chart::from_record(&ChartRecord {
            id: ChartId::new_v7(),
            name: "Empty".to_string(),
            currency: Currency::GBP,
            rows: vec![LedgerRow::parse("", "0000", "real", "COA", 0, 0)
                .unwrap_or_else(|e| panic!("bad root row: {e}"))],
        })
        .unwrap_or_else(|e| panic!("empty chart fixture is invalid: {e}"))
    }
}

/// Fixture for amounts
pub struct AmountFixtures;

impl AmountFixtures {
    /// 100 minor units
    pub fn hundred() -> Amount {
        Amount::new(100)
    }

    /// £100.50 in pence
    pub fn gbp_100_50() -> Amount {
        Amount::from_major(dec!(100.50), Currency::GBP)
            .unwrap_or_else(|e| panic!("bad amount fixture: {e}"))
    }

    /// Largest representable amount
    pub fn max() -> Amount {
        Amount::new(u64::MAX)
    }
}

/// Fixture for posting dates
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// 2020-08-05 13:36 UTC
    pub fn posting_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 8, 5, 13, 36, 0)
            .single()
            .unwrap_or_else(|| panic!("bad posting date"))
    }

    /// One day after [`TemporalFixtures::posting_date`]
    pub fn next_day() -> DateTime<Utc> {
        Self::posting_date() + chrono::Duration::days(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personal_rows_build_a_tree() {
        let chart = ChartFixtures::personal_chart();

        assert_eq!(chart.tree().len(), 16);
        assert_eq!(chart.tree().height(), 6);
        assert_eq!(chart.parent_code(&code("2100")), Some(&code("2000")));
    }

    #[test]
    fn test_definition_matches_rows() {
        let from_definition = ChartFixtures::personal_definition().to_tree().unwrap();

        assert_eq!(from_definition.to_rows(), ChartFixtures::personal_rows());
    }

    #[test]
    fn test_amount_fixtures() {
        assert_eq!(AmountFixtures::gbp_100_50(), Amount::new(10050));
    }
}
