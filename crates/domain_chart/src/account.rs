//! Accounts in the chart
//!
//! An account is a node value in the chart tree. Its debit and credit totals
//! are accumulated by the store as postings are written; the domain only reads
//! them to derive a balance.

use serde::{Deserialize, Serialize};

use core_kernel::{AccountType, Amount, CoreError, NominalCode};

/// An account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    code: NominalCode,
    account_type: AccountType,
    name: String,
    debit: Amount,
    credit: Amount,
}

impl Account {
    /// Creates a new account with zero totals
    ///
    /// # Arguments
    ///
    /// * `code` - Nominal code, unique within the chart
    /// * `account_type` - Sign class and category
    /// * `name` - Display name
    pub fn new(code: NominalCode, account_type: AccountType, name: impl Into<String>) -> Self {
        Self {
            code,
            account_type,
            name: name.into(),
            debit: Amount::ZERO,
            credit: Amount::ZERO,
        }
    }

    /// Sets the stored debit and credit totals
    pub fn with_totals(mut self, debit: Amount, credit: Amount) -> Self {
        self.debit = debit;
        self.credit = credit;
        self
    }

    pub fn code(&self) -> &NominalCode {
        &self.code
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total of debit postings
    pub fn debit(&self) -> Amount {
        self.debit
    }

    /// Total of credit postings
    pub fn credit(&self) -> Amount {
        self.credit
    }

    /// True if either total is non-zero
    pub fn has_totals(&self) -> bool {
        !self.debit.is_zero() || !self.credit.is_zero()
    }

    /// Balance derived from the totals according to the account type
    ///
    /// # Errors
    ///
    /// Returns `DummyAccountType` if the account has no type assigned
    pub fn balance(&self) -> Result<i128, CoreError> {
        self.account_type.balance(self.debit.value(), self.credit.value())
    }
}
