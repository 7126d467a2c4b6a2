//! Collectors' cash reconciliation records

use std::sync::Arc;

use lt_core::{DashboardSettings, EventBus};
use lt_data::{Conciliation, ConciliationStatus, ConciliationSummary, DataError, TableName, TableSource};

use crate::cards::{conciliation_cards, StatCard};
use crate::tables::{report_load, CellAlign, Column, TableFrame, TableView};
use crate::Variant;

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn status_variant(status: ConciliationStatus) -> Variant {
    match status {
        ConciliationStatus::Balanced => Variant::Success,
        ConciliationStatus::Surplus => Variant::Info,
        ConciliationStatus::Shortfall => Variant::Danger,
    }
}

/// Paginated conciliation records with summary cards
pub struct ConciliationTable {
    table: TableView<Conciliation>,
    rows: Vec<Conciliation>,
}

impl ConciliationTable {
    pub fn new(settings: &DashboardSettings) -> Self {
        let columns = vec![
            Column::new("Date", |c: &Conciliation| c.date.format("%Y-%m-%d").to_string()),
            Column::new("Collector", |c: &Conciliation| c.collector.clone()),
            Column::new("Route", |c: &Conciliation| c.route.clone().unwrap_or_default()),
            Column::new("Expected", |c: &Conciliation| amount(c.expected_amount)).align(CellAlign::Right),
            Column::new("Collected", |c: &Conciliation| amount(c.collected_amount)).align(CellAlign::Right),
            Column::new("Expenses", |c: &Conciliation| amount(c.expenses)).align(CellAlign::Right),
            Column::new("Difference", |c: &Conciliation| amount(c.difference())).align(CellAlign::Right),
            Column::new("Notes", |c: &Conciliation| c.notes.clone().unwrap_or_default()),
        ];

        let table = TableView::with_settings("Conciliations", columns, settings)
            .with_row_variant(|c: &Conciliation| status_variant(c.status()));

        Self {
            table,
            rows: Vec::new(),
        }
    }

    pub fn with_events(mut self, bus: Arc<EventBus>) -> Self {
        self.table = self.table.with_events(bus);
        self
    }

    /// Refetch the `conciliaciones` table; returns the new row count
    pub async fn refresh(&mut self, source: &dyn TableSource) -> Result<usize, DataError> {
        let result = source.conciliations().await;
        self.rows = report_load(TableName::Conciliaciones, result, self.table.events())?;
        Ok(self.rows.len())
    }

    pub fn set_rows(&mut self, rows: Vec<Conciliation>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[Conciliation] {
        &self.rows
    }

    /// Totals over every record, not just the visible page
    pub fn summary(&self) -> ConciliationSummary {
        ConciliationSummary::from_records(&self.rows)
    }

    pub fn summary_cards(&self) -> Vec<StatCard> {
        conciliation_cards(&self.summary())
    }

    pub fn frame(&mut self) -> TableFrame {
        self.table.frame(&self.rows)
    }

    pub fn table(&mut self) -> &mut TableView<Conciliation> {
        &mut self.table
    }
}
