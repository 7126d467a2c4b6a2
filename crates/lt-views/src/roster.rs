//! Client (debtor) roster

use std::sync::Arc;

use lt_core::{DashboardSettings, EventBus};
use lt_data::{DataError, Debtor, TableName, TableSource};

use crate::tables::{report_load, CellAlign, Column, TableFrame, TableView};
use crate::Variant;

/// Paginated list of the lender's clients
pub struct ClientRoster {
    table: TableView<Debtor>,
    rows: Vec<Debtor>,
}

impl ClientRoster {
    pub fn new(settings: &DashboardSettings) -> Self {
        let columns = vec![
            Column::new("Name", |d: &Debtor| d.full_name.clone()),
            Column::new("Document", |d: &Debtor| d.document.clone()).align(CellAlign::Right),
            Column::new("Phone", |d: &Debtor| d.phone.clone().unwrap_or_default()),
            Column::new("Route", |d: &Debtor| d.route.clone().unwrap_or_default()),
            Column::new("Status", |d: &Debtor| {
                if d.active { "Active" } else { "Inactive" }.to_string()
            })
            .align(CellAlign::Center),
        ];

        let table = TableView::with_settings("Clients", columns, settings).with_row_variant(|d: &Debtor| {
            if d.active {
                Variant::Default
            } else {
                Variant::Warning
            }
        });

        Self {
            table,
            rows: Vec::new(),
        }
    }

    pub fn with_events(mut self, bus: Arc<EventBus>) -> Self {
        self.table = self.table.with_events(bus);
        self
    }

    /// Refetch the `deudores` table; returns the new row count
    pub async fn refresh(&mut self, source: &dyn TableSource) -> Result<usize, DataError> {
        let result = source.debtors().await;
        self.rows = report_load(TableName::Deudores, result, self.table.events())?;
        Ok(self.rows.len())
    }

    /// Replace the rows with an already filtered and ordered list
    pub fn set_rows(&mut self, rows: Vec<Debtor>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[Debtor] {
        &self.rows
    }

    /// Frame for the current page
    pub fn frame(&mut self) -> TableFrame {
        self.table.frame(&self.rows)
    }

    /// Table controls
    pub fn table(&mut self) -> &mut TableView<Debtor> {
        &mut self.table
    }
}
