//! View models for the loan tracker dashboard
//!
//! Views here never draw anything. They turn records into rendering-neutral
//! frames (rows of cells, stat cards, page summaries) that a UI layer can
//! paint however it likes.

mod dashboard_view;
mod variant;
pub mod tables;
pub mod cards;
mod roster;
mod conciliations;

pub use dashboard_view::{DashboardView, ViewId};
pub use variant::Variant;
pub use tables::{
    Cell, CellAlign, Column, HeaderCell, NavState, PageSummary, Row, TableConfig, TableFrame,
    TableView,
};
pub use cards::{LoanStatsPanel, StatCard, StatValue};
pub use roster::ClientRoster;
pub use conciliations::ConciliationTable;
