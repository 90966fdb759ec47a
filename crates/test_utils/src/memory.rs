//! In-memory store adapter
//!
//! [`InMemoryLedgerStore`] implements both [`ChartStore`] and
//! [`JournalStore`] over process memory, for tests and examples.
//!
//! # Posting
//!
//! Writing a transaction adds every entry to its account and to each
//! ancestor of that account up to the root. All new totals are computed
//! before any is stored, so a failed write leaves the chart untouched.
//!
//! # Error Handling
//!
//! Domain errors are translated to `PortError` variants:
//! - unknown chart, transaction or account -> `PortError::NotFound`
//! - duplicate code or name, second root, funded account -> `PortError::Conflict`
//! - invalid transaction -> `PortError::Validation`

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{Amount, ChartId, DomainPort, NominalCode, PortError, TransactionId};
use domain_chart::{Chart, ChartError, ChartRecord, ChartStore, LedgerRow};
use domain_journal::{Entry, JournalStore, SplitTransaction, SplitTransactionBuilder};

#[derive(Debug, Clone)]
struct StoredChart {
    record: ChartRecord,
    journals: Vec<SplitTransaction>,
}

impl StoredChart {
    fn chart(&self) -> Result<Chart, PortError> {
        Chart::from_record(&self.record).map_err(chart_to_port_error)
    }

    fn row_index(&self) -> HashMap<&NominalCode, usize> {
        self.record
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (&row.code, i))
            .collect()
    }

    /// New (debit, credit) totals per row index after applying `txn`
    fn posted_totals(&self, txn: &SplitTransaction) -> Result<HashMap<usize, (Amount, Amount)>, PortError> {
        let index = self.row_index();
        let mut totals: HashMap<usize, (Amount, Amount)> = HashMap::new();

        for entry in txn.entries() {
            let mut cursor = Some(
                *index
                    .get(entry.code())
                    .ok_or_else(|| PortError::not_found("account", entry.code()))?,
            );
            while let Some(i) = cursor {
                let row = &self.record.rows[i];
                let (debit, credit) = totals
                    .entry(i)
                    .or_insert((Amount::new(row.debit), Amount::new(row.credit)));
                if entry.is_debit() {
                    *debit = debit.checked_add(entry.amount()).map_err(overflow)?;
                } else {
                    *credit = credit.checked_add(entry.amount()).map_err(overflow)?;
                }
                cursor = row.parent.as_ref().and_then(|p| index.get(p).copied());
            }
        }
        Ok(totals)
    }
}

fn overflow(e: core_kernel::MoneyError) -> PortError {
    PortError::validation_field(e.to_string(), "amount")
}

/// Converts a chart domain error to a port error
fn chart_to_port_error(e: ChartError) -> PortError {
    match e {
        ChartError::AccountNotFound(code) | ChartError::ParentNotFound(code) => {
            PortError::not_found("account", code)
        }
        ChartError::DuplicateCode(_)
        | ChartError::DuplicateName(_)
        | ChartError::RootAlreadySet(_)
        | ChartError::AccountHasBalance { .. } => PortError::conflict(e.to_string()),
        ChartError::Core(core) => PortError::Domain(core),
        ChartError::MissingRoot => PortError::validation_field(e.to_string(), "rows"),
        ChartError::Configuration(_) => PortError::internal(e.to_string()),
    }
}

/// Chart and journal store held in memory
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    charts: RwLock<HashMap<ChartId, StoredChart>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charts held
    pub async fn chart_count(&self) -> usize {
        self.charts.read().await.len()
    }
}

impl DomainPort for InMemoryLedgerStore {}

#[async_trait]
impl ChartStore for InMemoryLedgerStore {
    #[instrument(level = "debug", skip_all, fields(chart = %record.name))]
    async fn create_chart(&self, record: ChartRecord) -> Result<ChartId, PortError> {
        Chart::from_record(&record).map_err(chart_to_port_error)?;

        let id = ChartId::new_v7();
        let stored = StoredChart {
            record: ChartRecord { id, ..record },
            journals: Vec::new(),
        };
        self.charts.write().await.insert(id, stored);
        debug!(%id, "chart created");
        Ok(id)
    }

    async fn fetch_chart(&self, id: ChartId) -> Result<ChartRecord, PortError> {
        self.charts
            .read()
            .await
            .get(&id)
            .map(|stored| stored.record.clone())
            .ok_or_else(|| PortError::not_found("chart", id))
    }

    #[instrument(level = "debug", skip(self, row), fields(code = %row.code))]
    async fn add_account(&self, chart: ChartId, row: LedgerRow) -> Result<(), PortError> {
        let mut charts = self.charts.write().await;
        let stored = charts
            .get_mut(&chart)
            .ok_or_else(|| PortError::not_found("chart", chart))?;

        let mut domain = stored.chart()?;
        domain
            .add_account(row.code.clone(), row.account_type, row.name.clone(), row.parent.as_ref())
            .map_err(chart_to_port_error)?;
        stored.record.rows = domain.to_record().rows;
        debug!("account added");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove_account(&self, chart: ChartId, code: &NominalCode) -> Result<(), PortError> {
        let mut charts = self.charts.write().await;
        let stored = charts
            .get_mut(&chart)
            .ok_or_else(|| PortError::not_found("chart", chart))?;

        let mut domain = stored.chart()?;
        let removed = domain.remove_account(code).map_err(chart_to_port_error)?;
        stored.record.rows = domain.to_record().rows;
        debug!(removed = removed.len(), "account removed");
        Ok(())
    }
}

#[async_trait]
impl JournalStore for InMemoryLedgerStore {
    #[instrument(level = "debug", skip(self, txn), fields(entries = txn.entries().len()))]
    async fn write_transaction(
        &self,
        chart: ChartId,
        txn: &SplitTransaction,
    ) -> Result<TransactionId, PortError> {
        txn.validate()
            .map_err(|e| PortError::validation_field(e.to_string(), "entries"))?;

        let mut charts = self.charts.write().await;
        let stored = charts
            .get_mut(&chart)
            .ok_or_else(|| PortError::not_found("chart", chart))?;

        let totals = stored.posted_totals(txn)?;
        for (i, (debit, credit)) in totals {
            let row = &mut stored.record.rows[i];
            row.debit = debit.value();
            row.credit = credit.value();
        }

        let id = TransactionId::new_v7();
        stored.journals.push(txn.with_assigned_id(id));
        debug!(txn = %id, "transaction written");
        Ok(id)
    }

    async fn fetch_transaction(
        &self,
        chart: ChartId,
        id: TransactionId,
    ) -> Result<SplitTransaction, PortError> {
        let charts = self.charts.read().await;
        let stored = charts
            .get(&chart)
            .ok_or_else(|| PortError::not_found("chart", chart))?;
        stored
            .journals
            .iter()
            .find(|txn| txn.id() == Some(id))
            .cloned()
            .ok_or_else(|| PortError::not_found("transaction", id))
    }

    #[instrument(level = "debug", skip(self))]
    async fn account_journals(
        &self,
        chart: ChartId,
        code: &NominalCode,
    ) -> Result<Vec<SplitTransaction>, PortError> {
        let charts = self.charts.read().await;
        let stored = charts
            .get(&chart)
            .ok_or_else(|| PortError::not_found("chart", chart))?;
        if !stored.record.rows.iter().any(|row| &row.code == code) {
            return Err(PortError::not_found("account", code));
        }

        let lines: Vec<SplitTransaction> = stored
            .journals
            .iter()
            .flat_map(|txn| {
                txn.entries()
                    .iter()
                    .filter(|entry| entry.code() == code)
                    .map(move |entry| journal_line(txn, entry))
            })
            .collect();
        debug!(lines = lines.len(), "account journals fetched");
        Ok(lines)
    }
}

/// One account's side of a stored transaction
fn journal_line(txn: &SplitTransaction, entry: &Entry) -> SplitTransaction {
    let line = if entry.is_debit() {
        Entry::debit(entry.code().clone(), entry.amount())
    } else {
        Entry::credit(entry.code().clone(), entry.amount())
    };
    let builder = SplitTransactionBuilder::new()
        .with_date(txn.date())
        .with_note(txn.note())
        .with_source(txn.source())
        .with_reference(txn.reference())
        .with_entry(line);
    match txn.id() {
        Some(id) => builder.with_id(id).build(),
        None => builder.build(),
    }
}
