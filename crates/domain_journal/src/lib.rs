//! Journal Domain - Double-Entry Transactions
//!
//! A transaction posts two or more entries against accounts of one chart.
//! Each entry is oriented by the account type it carries: debit-class types
//! post to the debit side, credit-class types to the credit side.
//!
//! # Balance invariant
//!
//! A transaction balances when the sum of its debit entries equals the sum of
//! its credit entries. Only balanced transactions have an amount, and only
//! balanced transactions are accepted by a [`JournalStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_journal::SimpleTransactionBuilder;
//!
//! let txn = SimpleTransactionBuilder::new("1210".parse()?, "4100".parse()?, Amount::new(100))
//!     .with_note("Invoice 42")
//!     .build();
//!
//! assert!(txn.is_simple());
//! assert_eq!(txn.amount()?, Amount::new(100));
//! ```

pub mod entry;
pub mod entry_set;
pub mod transaction;
pub mod builder;
pub mod ports;
pub mod error;

pub use entry::Entry;
pub use entry_set::TransactionEntrySet;
pub use transaction::SplitTransaction;
pub use builder::{SimpleTransactionBuilder, SplitTransactionBuilder};
pub use ports::{post_transaction, JournalStore};
pub use error::JournalError;
