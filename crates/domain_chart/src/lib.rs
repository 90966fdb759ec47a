//! Chart Domain - Hierarchical Chart of Accounts
//!
//! This crate models a chart of accounts as a single-rooted tree of accounts,
//! each identified by a nominal code that is unique within the chart.
//!
//! # Structure
//!
//! - The root is conventionally a `REAL` account whose totals net to zero
//! - Debit-oriented branches (assets, expenses) and credit-oriented branches
//!   (liabilities, income, equity) hang beneath it
//! - Every account carries authoritative debit/credit totals maintained by
//!   the store; the chart only derives balances from them
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_chart::{Chart, ChartTree};
//!
//! let tree = ChartTree::from_rows(&rows)?;
//! let chart = Chart::new("Main ledger", Currency::GBP).with_tree(tree)?;
//!
//! let bank = chart.account(&"1210".parse()?).expect("bank account");
//! let next = chart.next_code(&"1200".parse()?, &"1201".parse()?)?;
//! ```

pub mod account;
pub mod tree;
pub mod chart;
pub mod resolver;
pub mod ledger_row;
pub mod definition;
pub mod config;
pub mod ports;
pub mod error;

pub use account::Account;
pub use tree::{ChartNode, ChartTree, Visit, Walk};
pub use chart::Chart;
pub use resolver::NextCodeResolver;
pub use ledger_row::{ChartRecord, LedgerRow};
pub use definition::ChartDefinition;
pub use config::{ChartSettings, CodeWidthPolicy};
pub use ports::{load_chart, ChartStore};
pub use error::ChartError;
