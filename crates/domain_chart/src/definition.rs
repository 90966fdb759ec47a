//! Nested chart definitions
//!
//! A definition describes a whole chart as a nested document, the shape
//! chart templates are authored in:
//!
//! ```json
//! {
//!   "code": "0000", "type": "real", "name": "COA",
//!   "children": [
//!     { "code": "0001", "type": "dr", "name": "Balance Sheet", "children": [] }
//!   ]
//! }
//! ```
//!
//! Type names are matched ignoring case. Totals always start at zero.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use core_kernel::{AccountType, NominalCode};

use crate::account::Account;
use crate::error::ChartError;
use crate::tree::{ChartNode, ChartTree};

/// One account in a nested chart definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDefinition {
    #[serde(alias = "nominal")]
    pub code: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<ChartDefinition>,
}

impl ChartDefinition {
    pub fn new(
        code: impl Into<String>,
        account_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            account_type: account_type.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ChartDefinition) -> Self {
        self.children.push(child);
        self
    }

    /// Builds the account tree this definition describes
    ///
    /// # Errors
    ///
    /// - `InvalidNominalCode` / `UnknownAccountType` for a bad code or type
    /// - `DuplicateCode` if a code appears twice anywhere in the definition
    #[instrument(level = "debug", skip_all, fields(root = %self.code))]
    pub fn to_tree(&self) -> Result<ChartTree, ChartError> {
        let mut seen = HashSet::new();
        let root = self.to_node(&mut seen)?;
        Ok(ChartTree::with_root(root))
    }

    fn to_node(&self, seen: &mut HashSet<NominalCode>) -> Result<ChartNode, ChartError> {
        let code = NominalCode::new(self.code.trim())?;
        let account_type = AccountType::from_name(&self.account_type)?;
        if !seen.insert(code.clone()) {
            return Err(ChartError::DuplicateCode(code));
        }

        let mut node = ChartNode::new(Account::new(code, account_type, self.name.clone()));
        for child in &self.children {
            node = node.with_child(child.to_node(seen)?);
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::CoreError;

    #[test]
    fn test_to_tree() {
        let definition = ChartDefinition::new("0000", "real", "COA")
            .with_child(
                ChartDefinition::new("0001", "DR", "Balance Sheet")
                    .with_child(ChartDefinition::new("1000", "Asset", "Assets")),
            )
            .with_child(ChartDefinition::new("0002", "cr", "Profit And Loss"));

        let tree = definition.to_tree().unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.height(), 3);
        let assets = tree.find_by_code(&"1000".parse().unwrap()).unwrap();
        assert_eq!(assets.account_type(), AccountType::ASSET);
        assert!(!assets.has_totals());
    }

    #[test]
    fn test_unknown_type_name() {
        let definition = ChartDefinition::new("0000", "real", "COA")
            .with_child(ChartDefinition::new("0001", "debit", "Wrong"));

        assert!(matches!(
            definition.to_tree(),
            Err(ChartError::Core(CoreError::UnknownAccountType(name))) if name == "debit"
        ));
    }

    #[test]
    fn test_duplicate_code() {
        let definition = ChartDefinition::new("0000", "real", "COA")
            .with_child(ChartDefinition::new("1000", "dr", "One"))
            .with_child(ChartDefinition::new("1000", "dr", "Two"));

        assert!(matches!(definition.to_tree(), Err(ChartError::DuplicateCode(_))));
    }

    #[test]
    fn test_deserialize_nested() {
        let json = r#"{
            "nominal": "0000", "type": "real", "name": "COA",
            "children": [
                { "code": "0001", "type": "dr", "name": "Balance Sheet" }
            ]
        }"#;

        let definition: ChartDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(definition.code, "0000");
        assert_eq!(definition.children.len(), 1);
        assert!(definition.children[0].children.is_empty());
    }
}
