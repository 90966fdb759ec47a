//! Account type classification
//!
//! Every account carries a type that decides two independent things:
//!
//! - **Sign class**: whether the balance is `debit - credit` (debit accounts),
//!   `credit - debit` (credit accounts) or `|debit - credit|` (the real, root
//!   account which nets to zero).
//! - **Category**: asset, bank, customer and expense sit on the debit side;
//!   liability, income, equity and supplier on the credit side. Categories only
//!   change the column titles, never the balance arithmetic.
//!
//! The set of types is closed. Each value also has a fixed bit pattern used
//! by storage backends:
//!
//! | type      | bits | sign   |
//! |-----------|------|--------|
//! | dummy     | 0    | none   |
//! | real      | 1    | real   |
//! | dr        | 3    | debit  |
//! | asset     | 11   | debit  |
//! | bank      | 27   | debit  |
//! | customer  | 43   | debit  |
//! | expense   | 75   | debit  |
//! | cr        | 5    | credit |
//! | liability | 133  | credit |
//! | income    | 389  | credit |
//! | equity    | 645  | credit |
//! | supplier  | 1157 | credit |

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

const REAL_BASE: u16 = 0b001;
const DEBIT_BASE: u16 = 0b011;
const CREDIT_BASE: u16 = 0b101;

/// How an account's balance is derived from its totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignClass {
    /// Balance = |debit - credit|
    Real,
    /// Balance = debit - credit
    Debit,
    /// Balance = credit - debit
    Credit,
}

/// Category tags layered on the debit base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebitCategory {
    Plain,
    Asset,
    Bank,
    Customer,
    Expense,
}

/// Category tags layered on the credit base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditCategory {
    Plain,
    Liability,
    Income,
    Equity,
    Supplier,
}

/// The closed set of account types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AccountType {
    /// Placeholder for "no type assigned"; rejects every operation
    #[default]
    Dummy,
    /// Root/control account
    Real,
    Debit(DebitCategory),
    Credit(CreditCategory),
}

static NAMED: Lazy<HashMap<&'static str, AccountType>> = Lazy::new(|| {
    AccountType::ALL
        .iter()
        .map(|t| (t.name(), *t))
        .collect()
});

impl AccountType {
    pub const REAL: AccountType = AccountType::Real;
    pub const DR: AccountType = AccountType::Debit(DebitCategory::Plain);
    pub const ASSET: AccountType = AccountType::Debit(DebitCategory::Asset);
    pub const BANK: AccountType = AccountType::Debit(DebitCategory::Bank);
    pub const CUSTOMER: AccountType = AccountType::Debit(DebitCategory::Customer);
    pub const EXPENSE: AccountType = AccountType::Debit(DebitCategory::Expense);
    pub const CR: AccountType = AccountType::Credit(CreditCategory::Plain);
    pub const LIABILITY: AccountType = AccountType::Credit(CreditCategory::Liability);
    pub const INCOME: AccountType = AccountType::Credit(CreditCategory::Income);
    pub const EQUITY: AccountType = AccountType::Credit(CreditCategory::Equity);
    pub const SUPPLIER: AccountType = AccountType::Credit(CreditCategory::Supplier);

    /// Every named (non-dummy) account type
    pub const ALL: [AccountType; 11] = [
        Self::REAL,
        Self::DR,
        Self::CR,
        Self::ASSET,
        Self::BANK,
        Self::CUSTOMER,
        Self::EXPENSE,
        Self::INCOME,
        Self::LIABILITY,
        Self::EQUITY,
        Self::SUPPLIER,
    ];

    /// Canonical upper-case name
    pub fn name(&self) -> &'static str {
        match self {
            AccountType::Dummy => "DUMMY",
            AccountType::Real => "REAL",
            AccountType::Debit(DebitCategory::Plain) => "DR",
            AccountType::Debit(DebitCategory::Asset) => "ASSET",
            AccountType::Debit(DebitCategory::Bank) => "BANK",
            AccountType::Debit(DebitCategory::Customer) => "CUSTOMER",
            AccountType::Debit(DebitCategory::Expense) => "EXPENSE",
            AccountType::Credit(CreditCategory::Plain) => "CR",
            AccountType::Credit(CreditCategory::Liability) => "LIABILITY",
            AccountType::Credit(CreditCategory::Income) => "INCOME",
            AccountType::Credit(CreditCategory::Equity) => "EQUITY",
            AccountType::Credit(CreditCategory::Supplier) => "SUPPLIER",
        }
    }

    /// Looks up a named type, ignoring case
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccountType` for anything outside the closed set,
    /// including the dummy type which has no public name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        NAMED
            .get(name.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| CoreError::UnknownAccountType(name.to_string()))
    }

    /// Storage bit pattern
    pub fn bits(&self) -> u16 {
        match self {
            AccountType::Dummy => 0,
            AccountType::Real => REAL_BASE,
            AccountType::Debit(category) => {
                DEBIT_BASE
                    | match category {
                        DebitCategory::Plain => 0,
                        DebitCategory::Asset => 0b1000,
                        DebitCategory::Bank => 0b1_1000,
                        DebitCategory::Customer => 0b10_1000,
                        DebitCategory::Expense => 0b100_1000,
                    }
            }
            AccountType::Credit(category) => {
                CREDIT_BASE
                    | match category {
                        CreditCategory::Plain => 0,
                        CreditCategory::Liability => 0b1000_0000,
                        CreditCategory::Income => 0b1_1000_0000,
                        CreditCategory::Equity => 0b10_1000_0000,
                        CreditCategory::Supplier => 0b100_1000_0000,
                    }
            }
        }
    }

    /// Decodes a storage bit pattern
    ///
    /// # Errors
    ///
    /// Returns `UnknownBalanceType` when the pattern is not one of the twelve
    /// defined values.
    pub fn from_bits(bits: u16) -> Result<Self, CoreError> {
        if bits == 0 {
            return Ok(AccountType::Dummy);
        }
        Self::ALL
            .iter()
            .find(|t| t.bits() == bits)
            .copied()
            .ok_or(CoreError::UnknownBalanceType(bits))
    }

    /// Sign class of this type, or `None` for the dummy type
    pub fn sign_class(&self) -> Option<SignClass> {
        match self {
            AccountType::Dummy => None,
            AccountType::Real => Some(SignClass::Real),
            AccountType::Debit(_) => Some(SignClass::Debit),
            AccountType::Credit(_) => Some(SignClass::Credit),
        }
    }

    pub fn is_debit(&self) -> bool {
        matches!(self, AccountType::Debit(_))
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, AccountType::Credit(_))
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self, AccountType::Dummy)
    }

    /// Computes the balance of a pair of debit/credit totals
    ///
    /// # Errors
    ///
    /// Returns `DummyAccountType` for the dummy type.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// assert_eq!(AccountType::ASSET.balance(100, 30)?, 70);
    /// assert_eq!(AccountType::INCOME.balance(100, 30)?, -70);
    /// assert_eq!(AccountType::REAL.balance(30, 100)?, 70);
    /// ```
    pub fn balance(&self, debit: u64, credit: u64) -> Result<i128, CoreError> {
        let (debit, credit) = (i128::from(debit), i128::from(credit));
        match self.sign_class() {
            None => Err(CoreError::DummyAccountType),
            Some(SignClass::Debit) => Ok(debit - credit),
            Some(SignClass::Credit) => Ok(credit - debit),
            Some(SignClass::Real) => Ok((debit - credit).abs()),
        }
    }

    /// Debit and credit column titles for display
    ///
    /// # Errors
    ///
    /// - `DummyAccountType` for the dummy type
    /// - `UnknownBalanceType` for the real type, which has no column titles
    pub fn titles(&self) -> Result<(&'static str, &'static str), CoreError> {
        match self {
            AccountType::Dummy => Err(CoreError::DummyAccountType),
            AccountType::Real => Err(CoreError::UnknownBalanceType(self.bits())),
            AccountType::Debit(DebitCategory::Plain) | AccountType::Credit(CreditCategory::Plain) => {
                Ok(("Debit", "Credit"))
            }
            AccountType::Debit(DebitCategory::Asset | DebitCategory::Bank | DebitCategory::Customer) => {
                Ok(("Increase", "Decrease"))
            }
            AccountType::Debit(DebitCategory::Expense) => Ok(("Expense", "Refund")),
            AccountType::Credit(CreditCategory::Income) => Ok(("Charge", "Income")),
            AccountType::Credit(
                CreditCategory::Liability | CreditCategory::Equity | CreditCategory::Supplier,
            ) => Ok(("Decrease", "Increase")),
        }
    }

    /// Debit column title
    pub fn debit_title(&self) -> Result<&'static str, CoreError> {
        self.titles().map(|(dr, _)| dr)
    }

    /// Credit column title
    pub fn credit_title(&self) -> Result<&'static str, CoreError> {
        self.titles().map(|(_, cr)| cr)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccountType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for AccountType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<AccountType> for String {
    fn from(account_type: AccountType) -> String {
        account_type.name().to_string()
    }
}
