//! Chart tree
//!
//! A single-rooted tree of accounts. Nodes own their children, so a node is
//! only ever reachable from one parent and cycles cannot be built.
//!
//! The tree validates local linkage only: a child can only be attached to a
//! parent that exists. Chart-wide rules (one root, unique codes, unique names)
//! are enforced by [`Chart`](crate::Chart) and by [`ChartTree::from_rows`].
//!
//! All searches are depth-first, pre-order: a parent is visited before its
//! children and children in insertion order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::NominalCode;

use crate::account::Account;
use crate::error::{ensure_named, ChartError};
use crate::ledger_row::LedgerRow;

/// A node in the chart tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartNode {
    account: Account,
    children: Vec<ChartNode>,
}

impl ChartNode {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            children: Vec::new(),
        }
    }

    /// Appends a child node
    pub fn with_child(mut self, child: ChartNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn children(&self) -> &[ChartNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Levels from this node to its deepest leaf, counting this node
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(ChartNode::height).max().unwrap_or(0)
    }

    /// Number of accounts in this subtree
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(ChartNode::len).sum::<usize>()
    }

    /// Walks this subtree depth-first, starting at this node
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(None, self, 0)],
        }
    }

    fn find_mut(&mut self, code: &NominalCode) -> Option<&mut ChartNode> {
        if self.account.code() == code {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(code))
    }

    fn detach(&mut self, code: &NominalCode) -> Option<ChartNode> {
        if let Some(pos) = self.children.iter().position(|c| c.account.code() == code) {
            return Some(self.children.remove(pos));
        }
        self.children.iter_mut().find_map(|child| child.detach(code))
    }
}

/// One step of a pre-order walk
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Parent account, `None` for the root
    pub parent: Option<&'a Account>,
    pub account: &'a Account,
    /// Zero for the root
    pub depth: usize,
    pub node: &'a ChartNode,
}

/// Pre-order iterator over a chart tree
pub struct Walk<'a> {
    stack: Vec<(Option<&'a Account>, &'a ChartNode, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (parent, node, depth) = self.stack.pop()?;
        self.stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (Some(&node.account), child, depth + 1)),
        );
        Some(Visit {
            parent,
            account: &node.account,
            depth,
            node,
        })
    }
}

/// The account hierarchy of one chart
///
/// Serializes as its pre-order rows and deserializes through
/// [`ChartTree::from_rows`]. An empty row list is an empty tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LedgerRow>", into = "Vec<LedgerRow>")]
pub struct ChartTree {
    root: Option<ChartNode>,
}

impl ChartTree {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree from a prepared root node
    pub fn with_root(root: ChartNode) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&ChartNode> {
        self.root.as_ref()
    }

    /// Replaces the whole tree with `root`, returning the previous root
    pub fn set_root(&mut self, root: ChartNode) -> Option<ChartNode> {
        debug!(root = %root.account.code(), "setting chart root");
        self.root.replace(root)
    }

    /// Attaches `child` beneath the account with code `parent`
    ///
    /// # Errors
    ///
    /// Returns `ParentNotFound` if no account in the tree has code `parent`
    pub fn add_child(&mut self, parent: &NominalCode, child: ChartNode) -> Result<(), ChartError> {
        let node = self
            .root
            .as_mut()
            .and_then(|root| root.find_mut(parent))
            .ok_or_else(|| ChartError::parent_not_found(parent))?;
        debug!(parent = %parent, child = %child.account.code(), "adding child account");
        node.children.push(child);
        Ok(())
    }

    /// Detaches the subtree rooted at `code`
    ///
    /// Removing the root empties the tree.
    pub fn remove(&mut self, code: &NominalCode) -> Option<ChartNode> {
        let root = self.root.as_mut()?;
        if root.account.code() == code {
            return self.root.take();
        }
        root.detach(code)
    }

    /// Walks the tree depth-first, parents before children
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.root.iter().map(|root| (None, root, 0)).collect(),
        }
    }

    /// First account, in pre-order, matching `predicate`
    pub fn find<P>(&self, mut predicate: P) -> Option<&Account>
    where
        P: FnMut(&Account) -> bool,
    {
        self.walk().map(|v| v.account).find(|account| predicate(account))
    }

    /// All accounts, in pre-order, matching `predicate`
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Account>
    where
        P: FnMut(&Account) -> bool,
    {
        self.walk()
            .map(|v| v.account)
            .filter(|account| predicate(account))
            .collect()
    }

    pub fn find_by_code(&self, code: &NominalCode) -> Option<&Account> {
        self.find(|account| account.code() == code)
    }

    /// First account with this display name; names are not required to be unique
    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.find(|account| account.name() == name)
    }

    pub fn has_account(&self, code: &NominalCode) -> bool {
        self.find_by_code(code).is_some()
    }

    /// The node holding `code`, with its children
    pub fn node(&self, code: &NominalCode) -> Option<&ChartNode> {
        self.walk()
            .find(|v| v.account.code() == code)
            .map(|v| v.node)
    }

    /// Code of the parent of `code`; `None` for the root or an unknown code
    pub fn parent_code(&self, code: &NominalCode) -> Option<&NominalCode> {
        self.walk()
            .find(|v| v.account.code() == code)
            .and_then(|v| v.parent)
            .map(Account::code)
    }

    /// Direct children of `code`
    pub fn children(&self, code: &NominalCode) -> Option<Vec<&Account>> {
        self.node(code)
            .map(|node| node.children.iter().map(ChartNode::account).collect())
    }

    /// Levels from the root to the deepest leaf; zero for an empty tree
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, ChartNode::height)
    }

    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, ChartNode::len)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Rebuilds a tree from stored rows
    ///
    /// The first row must be the root (no parent) and every other row must
    /// name a parent that appears earlier in the list, which holds for any
    /// pre-order or breadth-first listing.
    ///
    /// # Errors
    ///
    /// - `MissingRoot` if the list is empty or does not start with a root
    /// - `RootAlreadySet` if a later row has no parent
    /// - `ParentNotFound` if a row names a parent not seen yet
    /// - `DuplicateCode` if a code appears twice
    /// - `DummyAccountType` if a row carries the dummy type
    #[instrument(level = "debug", skip_all, fields(rows = rows.len()))]
    pub fn from_rows(rows: &[LedgerRow]) -> Result<Self, ChartError> {
        let (first, rest) = rows.split_first().ok_or(ChartError::MissingRoot)?;
        if first.parent.is_some() {
            return Err(ChartError::MissingRoot);
        }
        for row in rows {
            ensure_named(row.account_type)?;
        }

        let mut seen: HashSet<&NominalCode> = HashSet::with_capacity(rows.len());
        seen.insert(&first.code);
        let mut tree = ChartTree::with_root(ChartNode::new(first.to_account()));

        for row in rest {
            let parent = row
                .parent
                .as_ref()
                .ok_or_else(|| ChartError::RootAlreadySet(first.code.clone()))?;
            if !seen.insert(&row.code) {
                return Err(ChartError::DuplicateCode(row.code.clone()));
            }
            tree.add_child(parent, ChartNode::new(row.to_account()))?;
        }

        debug!(accounts = tree.len(), height = tree.height(), "chart tree rebuilt from rows");
        Ok(tree)
    }

    /// Flattens the tree into rows, in pre-order
    pub fn to_rows(&self) -> Vec<LedgerRow> {
        self.walk()
            .map(|v| LedgerRow::from_account(v.parent.map(Account::code), v.account))
            .collect()
    }
}

impl TryFrom<Vec<LedgerRow>> for ChartTree {
    type Error = ChartError;

    fn try_from(rows: Vec<LedgerRow>) -> Result<Self, Self::Error> {
        if rows.is_empty() {
            return Ok(ChartTree::new());
        }
        ChartTree::from_rows(&rows)
    }
}

impl From<ChartTree> for Vec<LedgerRow> {
    fn from(tree: ChartTree) -> Self {
        tree.to_rows()
    }
}
