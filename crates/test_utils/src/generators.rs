//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{AccountType, Amount, Currency, NominalCode};
use domain_journal::{Entry, SplitTransaction, SplitTransactionBuilder};
use proptest::prelude::*;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::GBP),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::JPY),
        Just(Currency::CHF),
        Just(Currency::AUD),
        Just(Currency::CAD),
    ]
}

/// Strategy for generating valid nominal codes of 1 to 10 digits
pub fn nominal_code_strategy() -> impl Strategy<Value = NominalCode> {
    "[0-9]{1,10}".prop_map(|s| NominalCode::new(s).unwrap_or_else(|e| panic!("{e}")))
}

/// Strategy for generating any named (non-dummy) account type
pub fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    proptest::sample::select(AccountType::ALL.to_vec())
}

/// Strategy for account types an entry can post to
pub fn posting_type_strategy() -> impl Strategy<Value = AccountType> {
    account_type_strategy().prop_filter("real accounts have no posting side", |t| {
        t.is_debit() || t.is_credit()
    })
}

/// Strategy for amounts small enough that sums of a few never overflow
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    (0u64..1_000_000_000u64).prop_map(Amount::new)
}

/// Strategy for a single valid entry
pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (nominal_code_strategy(), amount_strategy(), posting_type_strategy()).prop_map(
        |(code, amount, account_type)| {
            Entry::new(code, amount, account_type).unwrap_or_else(|e| panic!("{e}"))
        },
    )
}

/// Strategy for balanced split transactions
///
/// Debit amounts are random; one credit entry per debit mirrors it, so debit
/// and credit totals always agree.
pub fn balanced_transaction_strategy() -> impl Strategy<Value = SplitTransaction> {
    prop::collection::vec((nominal_code_strategy(), nominal_code_strategy(), amount_strategy()), 1..6)
        .prop_map(|legs| {
            let entries = legs.into_iter().flat_map(|(dr, cr, amount)| {
                [Entry::debit(dr, amount), Entry::credit(cr, amount)]
            });
            SplitTransactionBuilder::new().with_entries(entries).build()
        })
}

/// Strategy for transactions whose debit and credit totals differ
pub fn unbalanced_transaction_strategy() -> impl Strategy<Value = SplitTransaction> {
    (nominal_code_strategy(), nominal_code_strategy(), amount_strategy(), 1u64..1_000)
        .prop_map(|(dr, cr, amount, skew)| {
            SplitTransactionBuilder::new()
                .with_entry(Entry::debit(dr, Amount::new(amount.value() + skew)))
                .with_entry(Entry::credit(cr, amount))
                .build()
        })
}
