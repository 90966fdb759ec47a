//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Amount, Currency, NominalCode};
use domain_chart::Chart;
use domain_journal::SplitTransaction;
use rust_decimal::Decimal;

/// Asserts the stored debit and credit totals of one account
///
/// # Panics
///
/// Panics if the account is missing or either total differs
pub fn assert_totals(chart: &Chart, code: &str, debit: u64, credit: u64) {
    let nominal = NominalCode::new(code).unwrap_or_else(|e| panic!("bad code {code:?}: {e}"));
    let account = chart
        .account(&nominal)
        .unwrap_or_else(|| panic!("account {code} not found in chart {}", chart.name()));
    assert_eq!(
        (account.debit().value(), account.credit().value()),
        (debit, credit),
        "Totals mismatch for {code}: actual (dr, cr)=({}, {}), expected ({debit}, {credit})",
        account.debit(),
        account.credit()
    );
}

/// Asserts the root account's debit and credit totals are equal
pub fn assert_root_nets_to_zero(chart: &Chart) {
    let root = chart
        .tree()
        .root()
        .unwrap_or_else(|| panic!("chart {} has no root", chart.name()))
        .account();
    assert_eq!(
        root.debit(),
        root.credit(),
        "Root {} does not net to zero: dr={}, cr={}",
        root.code(),
        root.debit(),
        root.credit()
    );
}

/// Asserts every account's totals are at least the sum of its children's
///
/// Holds whenever postings are propagated to every ancestor.
pub fn assert_parents_cover_children(chart: &Chart) {
    for visit in chart.tree().walk() {
        let (debit, credit) = visit
            .node
            .children()
            .iter()
            .map(|child| child.account())
            .fold((0u128, 0u128), |(d, c), a| {
                (d + u128::from(a.debit().value()), c + u128::from(a.credit().value()))
            });
        let account = visit.account;
        assert!(
            u128::from(account.debit().value()) >= debit && u128::from(account.credit().value()) >= credit,
            "Account {} totals (dr={}, cr={}) are below its children's (dr={debit}, cr={credit})",
            account.code(),
            account.debit(),
            account.credit()
        );
    }
}

/// Asserts a transaction balances
pub fn assert_balanced(txn: &SplitTransaction) {
    assert!(
        txn.check_balance(),
        "Expected balanced transaction, got debits={} credits={}",
        txn.entries().debit_total(),
        txn.entries().credit_total()
    );
}

/// Asserts a transaction does not balance
pub fn assert_unbalanced(txn: &SplitTransaction) {
    assert!(
        !txn.check_balance(),
        "Expected unbalanced transaction, both sides total {}",
        txn.entries().debit_total()
    );
}

/// Asserts an amount equals `expected` in major units of `currency`
pub fn assert_amount_major_eq(actual: Amount, currency: Currency, expected: Decimal) {
    assert_eq!(
        actual.to_major(currency),
        expected,
        "Amount mismatch: actual={}, expected={}{}",
        actual.display_in(currency),
        currency.symbol(),
        expected
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{TestChartBuilder, TestTransactionBuilder};
    use core_kernel::AccountType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_totals_passes() {
        let chart = TestChartBuilder::new()
            .with_account("0000", "1000", AccountType::ASSET, "Assets")
            .with_totals("0000", 5, 5)
            .with_totals("1000", 5, 0)
            .build();

        assert_totals(&chart, "1000", 5, 0);
        assert_root_nets_to_zero(&chart);
        assert_parents_cover_children(&chart);
    }

    #[test]
    #[should_panic(expected = "Totals mismatch")]
    fn test_assert_totals_fails() {
        let chart = TestChartBuilder::new().with_totals("0000", 1, 0).build();

        assert_totals(&chart, "0000", 0, 0);
    }

    #[test]
    #[should_panic(expected = "below its children")]
    fn test_parent_below_children_fails() {
        let chart = TestChartBuilder::new()
            .with_account("0000", "1000", AccountType::ASSET, "Assets")
            .with_totals("1000", 5, 0)
            .build();

        assert_parents_cover_children(&chart);
    }

    #[test]
    fn test_transaction_assertions() {
        assert_balanced(&TestTransactionBuilder::new().sale(10));
        assert_unbalanced(&TestTransactionBuilder::new().split(&[("1210", 10, AccountType::BANK)]));
    }

    #[test]
    fn test_amount_major() {
        assert_amount_major_eq(Amount::new(10050), Currency::GBP, dec!(100.50));
    }
}
