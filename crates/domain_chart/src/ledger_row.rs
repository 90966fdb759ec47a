//! Flat persistence shape of a chart
//!
//! Stores keep a chart as an ordered list of rows, each naming its parent.
//! [`ChartTree::from_rows`](crate::ChartTree::from_rows) and
//! [`ChartTree::to_rows`](crate::ChartTree::to_rows) convert between the two.

use serde::{Deserialize, Serialize};

use core_kernel::{AccountType, Amount, ChartId, CoreError, Currency, NominalCode};

use crate::account::Account;

/// One stored account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Parent code; `None` only for the root row
    pub parent: Option<NominalCode>,
    pub code: NominalCode,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub name: String,
    #[serde(default)]
    pub debit: u64,
    #[serde(default)]
    pub credit: u64,
}

impl LedgerRow {
    pub fn new(
        parent: Option<NominalCode>,
        code: NominalCode,
        account_type: AccountType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            parent,
            code,
            account_type,
            name: name.into(),
            debit: 0,
            credit: 0,
        }
    }

    pub fn with_totals(mut self, debit: u64, credit: u64) -> Self {
        self.debit = debit;
        self.credit = credit;
        self
    }

    /// Builds a row from raw column values
    ///
    /// An empty `parent` marks the root row. Type names are matched ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// - `InvalidNominalCode` if `parent` or `code` is not a valid code
    /// - `UnknownAccountType` if `type_name` is not a known type
    pub fn parse(
        parent: &str,
        code: &str,
        type_name: &str,
        name: &str,
        debit: u64,
        credit: u64,
    ) -> Result<Self, CoreError> {
        let parent = match parent.trim() {
            "" => None,
            p => Some(NominalCode::new(p)?),
        };
        Ok(Self {
            parent,
            code: NominalCode::new(code.trim())?,
            account_type: AccountType::from_name(type_name)?,
            name: name.to_string(),
            debit,
            credit,
        })
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn to_account(&self) -> Account {
        Account::new(self.code.clone(), self.account_type, self.name.clone())
            .with_totals(Amount::new(self.debit), Amount::new(self.credit))
    }

    pub fn from_account(parent: Option<&NominalCode>, account: &Account) -> Self {
        Self {
            parent: parent.cloned(),
            code: account.code().clone(),
            account_type: account.account_type(),
            name: account.name().to_string(),
            debit: account.debit().value(),
            credit: account.credit().value(),
        }
    }
}

/// A stored chart: header plus its rows in pre-order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub id: ChartId,
    pub name: String,
    pub currency: Currency,
    pub rows: Vec<LedgerRow>,
}
