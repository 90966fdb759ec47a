//! Chart Domain Ports
//!
//! Persistence of charts sits behind [`ChartStore`]. Adapters (a relational
//! store, the in-memory store used in tests) exchange charts as
//! [`ChartRecord`]s so the tree never crosses the port boundary.
//!
//! ```rust,ignore
//! use domain_chart::{Chart, ports::{ChartStore, load_chart}};
//!
//! let id = store.create_chart(chart.to_record()).await?;
//! let chart: Chart = load_chart(store.as_ref(), id).await?;
//! ```
//!
//! Account totals are owned by the store: they change only when a journal
//! store writes postings, never through this port.

use async_trait::async_trait;

use core_kernel::{ChartId, DomainPort, NominalCode, PortError};

use crate::chart::Chart;
use crate::ledger_row::{ChartRecord, LedgerRow};

/// Persistence port for charts of accounts
#[async_trait]
pub trait ChartStore: DomainPort {
    /// Stores a new chart and returns its id
    ///
    /// The record's rows must start with the root account.
    async fn create_chart(&self, record: ChartRecord) -> Result<ChartId, PortError>;

    /// Fetches a chart with current account totals
    async fn fetch_chart(&self, id: ChartId) -> Result<ChartRecord, PortError>;

    /// Adds one account beneath the row's parent
    ///
    /// A row without a parent is rejected once the chart has a root.
    async fn add_account(&self, chart: ChartId, row: LedgerRow) -> Result<(), PortError>;

    /// Removes an account and its descendants
    ///
    /// Fails with `Conflict` if any of them carries totals.
    async fn remove_account(&self, chart: ChartId, code: &NominalCode) -> Result<(), PortError>;
}

/// Fetches a chart and rebuilds it as a domain [`Chart`]
///
/// Rows the domain rejects are reported as `Transformation` errors.
pub async fn load_chart<S>(store: &S, id: ChartId) -> Result<Chart, PortError>
where
    S: ChartStore + ?Sized,
{
    let record = store.fetch_chart(id).await?;
    Chart::from_record(&record).map_err(|e| PortError::transformation(e.to_string()))
}
