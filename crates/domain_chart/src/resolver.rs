//! Next nominal code allocation

use tracing::{debug, instrument};

use core_kernel::NominalCode;

use crate::config::CodeWidthPolicy;
use crate::error::ChartError;
use crate::tree::ChartTree;

/// Derives the next free child code beneath a parent account
pub struct NextCodeResolver<'a> {
    tree: &'a ChartTree,
    policy: CodeWidthPolicy,
}

impl<'a> NextCodeResolver<'a> {
    pub fn new(tree: &'a ChartTree) -> Self {
        Self {
            tree,
            policy: CodeWidthPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CodeWidthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Next code for a new child of `parent`
    ///
    /// A parent with no children gets `starter` back unchanged. Otherwise the
    /// result is one more than the highest numeric child code, zero-padded to
    /// the widest child code under [`CodeWidthPolicy::Preserve`].
    ///
    /// The starter only matters for a leaf parent. It is not a floor: children
    /// numbered below it still yield `max(children) + 1`, which can be lower
    /// than `starter`.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if `parent` is not in the tree
    /// - `InvalidNominalCode` if the next code needs more than ten digits
    #[instrument(level = "debug", skip_all, fields(parent = %parent, starter = %starter))]
    pub fn next(&self, parent: &NominalCode, starter: &NominalCode) -> Result<NominalCode, ChartError> {
        let node = self
            .tree
            .node(parent)
            .ok_or_else(|| ChartError::not_found(parent))?;

        let Some((highest, width)) = node
            .children()
            .iter()
            .map(|child| child.account().code())
            .fold(None, |acc: Option<(u64, usize)>, code| {
                let (max, width) = acc.unwrap_or((0, 0));
                Some((max.max(code.numeric_value()), width.max(code.width())))
            })
        else {
            debug!("parent has no children, using starter");
            return Ok(starter.clone());
        };

        let value = highest + 1;
        let rendered = match self.policy {
            CodeWidthPolicy::Preserve => format!("{value:0width$}"),
            CodeWidthPolicy::Plain => value.to_string(),
        };
        let next = NominalCode::new(rendered)?;

        debug!(next = %next, "derived next nominal code");
        Ok(next)
    }
}
