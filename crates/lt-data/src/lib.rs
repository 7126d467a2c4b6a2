//! Record shapes and data sources for the loan tracker dashboard
//!
//! Persistence lives in a remote backend that exposes the `deudores`,
//! `prestamos` and `conciliaciones` tables. This crate mirrors those rows as
//! typed records and defines the trait views use to fetch them.

pub mod schema;
pub mod sources;
pub mod stats;

use thiserror::Error;

// Re-exports
pub use schema::{Conciliation, ConciliationStatus, Debtor, Loan, LoanStatus, TableName};
pub use sources::{MemorySource, Snapshot, TableSource};
pub use stats::{ConciliationSummary, LoanStats};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Record not found in {table}: {id}")]
    NotFound {
        table: TableName,
        id: i64,
    },

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}
