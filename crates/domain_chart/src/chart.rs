//! Chart of accounts
//!
//! [`Chart`] owns a [`ChartTree`] and enforces the chart-wide rules the tree
//! itself does not check:
//!
//! - exactly one root account
//! - nominal codes unique across the chart
//! - display names unique when [`ChartSettings::unique_names`] is set
//! - an account carrying totals (or with descendants carrying totals) cannot
//!   be removed

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{AccountType, ChartId, Currency, NominalCode};

use crate::account::Account;
use crate::config::ChartSettings;
use crate::definition::ChartDefinition;
use crate::error::{ensure_named, ChartError};
use crate::ledger_row::ChartRecord;
use crate::resolver::NextCodeResolver;
use crate::tree::{ChartNode, ChartTree};

/// A named chart of accounts in one currency
///
/// Serializes as its [`ChartRecord`]; deserializing rebuilds the tree through
/// [`Chart::from_record`], so a deserialized chart satisfies the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChartRecord", into = "ChartRecord")]
pub struct Chart {
    id: ChartId,
    name: String,
    currency: Currency,
    tree: ChartTree,
    settings: ChartSettings,
}

impl Chart {
    /// Creates an empty chart
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: ChartId::new_v7(),
            name: name.into(),
            currency,
            tree: ChartTree::new(),
            settings: ChartSettings::default(),
        }
    }

    pub fn with_id(mut self, id: ChartId) -> Self {
        self.id = id;
        self
    }

    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Installs a prebuilt tree
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode`, `DummyAccountType` for an untyped account, or
    /// `DuplicateName` when the settings require unique names and the tree
    /// repeats one.
    pub fn with_tree(mut self, tree: ChartTree) -> Result<Self, ChartError> {
        self.check_tree(&tree)?;
        self.tree = tree;
        Ok(self)
    }

    /// Builds a chart from a nested definition
    #[instrument(level = "debug", skip_all, fields(chart = %name.as_ref()))]
    pub fn from_definition(
        name: impl AsRef<str>,
        currency: Currency,
        definition: &ChartDefinition,
    ) -> Result<Self, ChartError> {
        let tree = definition.to_tree()?;
        debug!(accounts = tree.len(), "chart built from definition");
        Chart::new(name.as_ref(), currency).with_tree(tree)
    }

    /// Rebuilds a chart from its stored record
    pub fn from_record(record: &ChartRecord) -> Result<Self, ChartError> {
        let tree = ChartTree::from_rows(&record.rows)?;
        Chart::new(record.name.clone(), record.currency)
            .with_id(record.id)
            .with_tree(tree)
    }

    /// Flattens the chart into its stored record
    pub fn to_record(&self) -> ChartRecord {
        ChartRecord {
            id: self.id,
            name: self.name.clone(),
            currency: self.currency,
            rows: self.tree.to_rows(),
        }
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn tree(&self) -> &ChartTree {
        &self.tree
    }

    pub fn account(&self, code: &NominalCode) -> Option<&Account> {
        self.tree.find_by_code(code)
    }

    /// First account, in pre-order, with this display name
    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.tree.find_by_name(name)
    }

    pub fn has_account(&self, code: &NominalCode) -> bool {
        self.tree.has_account(code)
    }

    pub fn parent_code(&self, code: &NominalCode) -> Option<&NominalCode> {
        self.tree.parent_code(code)
    }

    /// Balance of one account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown code or `DummyAccountType` for
    /// an untyped account.
    pub fn balance(&self, code: &NominalCode) -> Result<i128, ChartError> {
        let account = self.account(code).ok_or_else(|| ChartError::not_found(code))?;
        Ok(account.balance()?)
    }

    /// Next free child code beneath `parent`, rendered per the chart settings
    pub fn next_code(&self, parent: &NominalCode, starter: &NominalCode) -> Result<NominalCode, ChartError> {
        NextCodeResolver::new(&self.tree)
            .with_policy(self.settings.code_width)
            .next(parent, starter)
    }

    /// [`Chart::next_code`] using the configured default starter
    pub fn next_child_code(&self, parent: &NominalCode) -> Result<NominalCode, ChartError> {
        self.next_code(parent, &self.settings.default_starter)
    }

    /// Adds an account
    ///
    /// With no `parent` the account becomes the root, which is only allowed
    /// while the chart is empty.
    ///
    /// # Errors
    ///
    /// - `RootAlreadySet` when adding a second root
    /// - `ParentNotFound` when `parent` is not in the chart
    /// - `DuplicateCode` when `code` is already used
    /// - `DuplicateName` when names must be unique and `name` is taken
    /// - `DummyAccountType` for the dummy type
    #[instrument(level = "debug", skip(self, name), fields(chart = %self.id))]
    pub fn add_account(
        &mut self,
        code: NominalCode,
        account_type: AccountType,
        name: impl Into<String>,
        parent: Option<&NominalCode>,
    ) -> Result<&Account, ChartError> {
        let name = name.into();
        ensure_named(account_type)?;
        if self.tree.has_account(&code) {
            return Err(ChartError::DuplicateCode(code));
        }
        if self.settings.unique_names && self.tree.find_by_name(&name).is_some() {
            return Err(ChartError::DuplicateName(name));
        }

        let node = ChartNode::new(Account::new(code.clone(), account_type, name));
        match parent {
            None => {
                if let Some(root) = self.tree.root() {
                    return Err(ChartError::RootAlreadySet(root.account().code().clone()));
                }
                self.tree.set_root(node);
            }
            Some(parent) => self.tree.add_child(parent, node)?,
        }

        debug!(code = %code, "account added");
        self.account(&code).ok_or_else(|| ChartError::not_found(&code))
    }

    /// Removes an account and everything beneath it
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` for an unknown code
    /// - `AccountHasBalance` if any account in the subtree has totals
    #[instrument(level = "debug", skip(self), fields(chart = %self.id))]
    pub fn remove_account(&mut self, code: &NominalCode) -> Result<ChartNode, ChartError> {
        let node = self.tree.node(code).ok_or_else(|| ChartError::not_found(code))?;
        let funded = node
            .walk()
            .map(|v| v.account)
            .find(|a| a.has_totals())
            .map(|a| ChartError::AccountHasBalance {
                code: a.code().clone(),
                debit: a.debit().value(),
                credit: a.credit().value(),
            });
        if let Some(err) = funded {
            return Err(err);
        }

        let removed = self.tree.remove(code).ok_or_else(|| ChartError::not_found(code))?;
        debug!(removed = removed.len(), "account subtree removed");
        Ok(removed)
    }

    fn check_tree(&self, tree: &ChartTree) -> Result<(), ChartError> {
        let mut codes = HashSet::with_capacity(tree.len());
        let mut names = HashSet::new();
        for account in tree.walk().map(|v| v.account) {
            ensure_named(account.account_type())?;
            if !codes.insert(account.code()) {
                return Err(ChartError::DuplicateCode(account.code().clone()));
            }
            if self.settings.unique_names && !names.insert(account.name()) {
                return Err(ChartError::DuplicateName(account.name().to_string()));
            }
        }
        Ok(())
    }
}

impl TryFrom<ChartRecord> for Chart {
    type Error = ChartError;

    fn try_from(record: ChartRecord) -> Result<Self, Self::Error> {
        if record.rows.is_empty() {
            return Ok(Chart::new(record.name, record.currency).with_id(record.id));
        }
        Chart::from_record(&record)
    }
}

impl From<Chart> for ChartRecord {
    fn from(chart: Chart) -> Self {
        chart.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Amount, CoreError};

    fn code(s: &str) -> NominalCode {
        NominalCode::new(s).unwrap()
    }

    fn small_chart() -> Chart {
        let mut chart = Chart::new("Test", Currency::GBP);
        chart.add_account(code("0000"), AccountType::REAL, "COA", None).unwrap();
        chart
            .add_account(code("1000"), AccountType::ASSET, "Assets", Some(&code("0000")))
            .unwrap();
        chart
            .add_account(code("2000"), AccountType::LIABILITY, "Liabilities", Some(&code("0000")))
            .unwrap();
        chart
    }

    #[test]
    fn test_add_account_rules() {
        let mut chart = small_chart();

        assert!(matches!(
            chart.add_account(code("9000"), AccountType::REAL, "Other", None),
            Err(ChartError::RootAlreadySet(c)) if c == code("0000")
        ));
        assert!(matches!(
            chart.add_account(code("3100"), AccountType::EQUITY, "Capital", Some(&code("3000"))),
            Err(ChartError::ParentNotFound(_))
        ));
        assert!(matches!(
            chart.add_account(code("1000"), AccountType::ASSET, "Again", Some(&code("0000"))),
            Err(ChartError::DuplicateCode(_))
        ));
        assert_eq!(chart.tree().len(), 3);
    }

    #[test]
    fn test_dummy_type_is_rejected() {
        let mut chart = small_chart();

        let result = chart.add_account(code("3000"), AccountType::Dummy, "Untyped", Some(&code("0000")));

        assert!(matches!(result, Err(ChartError::Core(CoreError::DummyAccountType))));
        assert!(!chart.has_account(&code("3000")));
    }

    #[test]
    fn test_unique_names_setting() {
        let settings = ChartSettings {
            unique_names: true,
            ..ChartSettings::default()
        };
        let mut chart = Chart::new("Strict", Currency::GBP).with_settings(settings);
        chart.add_account(code("0000"), AccountType::REAL, "COA", None).unwrap();

        let result = chart.add_account(code("1000"), AccountType::ASSET, "COA", Some(&code("0000")));

        assert!(matches!(result, Err(ChartError::DuplicateName(n)) if n == "COA"));
    }

    #[test]
    fn test_duplicate_names_allowed_by_default() {
        let mut chart = small_chart();

        chart
            .add_account(code("1100"), AccountType::ASSET, "Assets", Some(&code("1000")))
            .unwrap();

        assert_eq!(chart.account_by_name("Assets").unwrap().code(), &code("1000"));
    }

    #[test]
    fn test_remove_account_with_totals_is_refused() {
        let mut tree = small_chart().tree().clone();
        tree.add_child(
            &code("1000"),
            ChartNode::new(
                Account::new(code("1100"), AccountType::BANK, "Bank")
                    .with_totals(Amount::new(10), Amount::ZERO),
            ),
        )
        .unwrap();
        let mut chart = Chart::new("Funded", Currency::GBP).with_tree(tree).unwrap();

        let result = chart.remove_account(&code("1000"));

        assert!(matches!(
            result,
            Err(ChartError::AccountHasBalance { code: c, debit: 10, credit: 0 }) if c == code("1100")
        ));
        assert!(chart.has_account(&code("1100")));

        let removed = chart.remove_account(&code("2000")).unwrap();
        assert_eq!(removed.account().name(), "Liabilities");
        assert!(matches!(
            chart.remove_account(&code("2000")),
            Err(ChartError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_record_round_trip() {
        let chart = small_chart();

        let record = chart.to_record();
        let rebuilt = Chart::from_record(&record).unwrap();

        assert_eq!(rebuilt.id(), chart.id());
        assert_eq!(rebuilt.tree(), chart.tree());
    }

    #[test]
    fn test_next_child_code_uses_default_starter() {
        let chart = small_chart();

        assert_eq!(chart.next_child_code(&code("1000")).unwrap(), "1");
        assert_eq!(chart.next_child_code(&code("0000")).unwrap(), "2001");
    }
}
