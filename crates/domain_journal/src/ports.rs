//! Journal Domain Ports
//!
//! Writing a transaction is where account totals change: a store records the
//! transaction and adds each entry to its account and to every ancestor of
//! that account, so summary accounts always carry the totals of their
//! subtree.
//!
//! ```rust,ignore
//! use domain_journal::ports::{post_transaction, JournalStore};
//!
//! let id = post_transaction(store.as_ref(), chart_id, &txn).await?;
//! let lines = store.account_journals(chart_id, &"1210".parse()?).await?;
//! ```

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{ChartId, DomainPort, NominalCode, PortError, TransactionId};

use crate::transaction::SplitTransaction;

/// Persistence port for journal transactions
#[async_trait]
pub trait JournalStore: DomainPort {
    /// Records a transaction against a chart and returns its id
    ///
    /// Implementations must refuse transactions that do not validate and
    /// entries naming accounts the chart does not have.
    async fn write_transaction(
        &self,
        chart: ChartId,
        txn: &SplitTransaction,
    ) -> Result<TransactionId, PortError>;

    /// Fetches a stored transaction with all of its entries
    async fn fetch_transaction(
        &self,
        chart: ChartId,
        id: TransactionId,
    ) -> Result<SplitTransaction, PortError>;

    /// Every transaction touching `code`, oldest first
    ///
    /// Each returned transaction carries only the entry for `code`, as a
    /// plain debit or credit entry, so it does not balance on its own.
    async fn account_journals(
        &self,
        chart: ChartId,
        code: &NominalCode,
    ) -> Result<Vec<SplitTransaction>, PortError>;
}

/// Validates a transaction and hands it to the store
///
/// Domain failures are reported as `Validation` errors before the store is
/// called.
#[instrument(level = "debug", skip(store, txn), fields(entries = txn.entries().len()))]
pub async fn post_transaction<S>(
    store: &S,
    chart: ChartId,
    txn: &SplitTransaction,
) -> Result<TransactionId, PortError>
where
    S: JournalStore + ?Sized,
{
    txn.validate()
        .map_err(|e| PortError::validation_field(e.to_string(), "entries"))?;
    let id = store.write_transaction(chart, txn).await?;
    debug!(txn = %id, "transaction posted");
    Ok(id)
}
