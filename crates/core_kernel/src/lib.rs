//! Core Kernel - Foundational types for the accounting system
//!
//! This crate provides the value types shared by the chart and journal domains:
//! - Nominal codes identifying accounts within a chart
//! - The closed set of account types and their balance algebra
//! - Ledger amounts in minor currency units
//! - Common identifiers and the collaborator port error type

pub mod account_type;
pub mod money;
pub mod nominal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use account_type::{AccountType, CreditCategory, DebitCategory, SignClass};
pub use money::{Amount, Currency, MoneyError};
pub use nominal::{NominalCode, MAX_NOMINAL_DIGITS};
pub use identifiers::{ChartId, TransactionId};
pub use ports::{DomainPort, PortError};
pub use error::CoreError;
