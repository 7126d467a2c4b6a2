//! Data sources backing the dashboard views

use std::path::Path;

use parking_lot::RwLock;
use serde::{Serialize, Deserialize};

use crate::schema::{Conciliation, Debtor, Loan, TableName};
use crate::DataError;

/// Access to the remote tables
///
/// Rows come back already filtered and ordered by the backend. Views only
/// paginate them.
#[async_trait::async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch the `deudores` table
    async fn debtors(&self) -> Result<Vec<Debtor>, DataError>;

    /// Fetch the `prestamos` table
    async fn loans(&self) -> Result<Vec<Loan>, DataError>;

    /// Fetch the `conciliaciones` table
    async fn conciliations(&self) -> Result<Vec<Conciliation>, DataError>;

    /// Get the row count of a table
    async fn row_count(&self, table: TableName) -> Result<usize, DataError>;

    /// Get the source name
    fn source_name(&self) -> &str;
}

/// On-disk snapshot of the remote tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub deudores: Vec<Debtor>,
    #[serde(default)]
    pub prestamos: Vec<Loan>,
    #[serde(default)]
    pub conciliaciones: Vec<Conciliation>,
}

/// Table source holding its rows in memory
pub struct MemorySource {
    name: String,
    tables: RwLock<Snapshot>,
}

impl MemorySource {
    /// Create a source from already-fetched rows
    pub fn new(name: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            name: name.into(),
            tables: RwLock::new(snapshot),
        }
    }

    /// Parse a JSON snapshot
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, DataError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(name, snapshot))
    }

    /// Load a JSON snapshot from disk
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        let source = Self::from_json(path.display().to_string(), &json)?;

        let tables = source.tables.read();
        tracing::info!(
            "Loaded snapshot {:?}: {} debtors, {} loans, {} conciliations",
            path,
            tables.deudores.len(),
            tables.prestamos.len(),
            tables.conciliaciones.len()
        );
        drop(tables);

        Ok(source)
    }

    /// Write the current rows as a JSON snapshot
    pub fn save(&self, path: &Path) -> Result<(), DataError> {
        let json = serde_json::to_string_pretty(&*self.tables.read())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn replace_debtors(&self, debtors: Vec<Debtor>) {
        tracing::debug!("Replacing {} with {} rows", TableName::Deudores, debtors.len());
        self.tables.write().deudores = debtors;
    }

    pub fn replace_loans(&self, loans: Vec<Loan>) {
        tracing::debug!("Replacing {} with {} rows", TableName::Prestamos, loans.len());
        self.tables.write().prestamos = loans;
    }

    pub fn replace_conciliations(&self, conciliations: Vec<Conciliation>) {
        tracing::debug!("Replacing {} with {} rows", TableName::Conciliaciones, conciliations.len());
        self.tables.write().conciliaciones = conciliations;
    }

    /// Look up a single debtor
    pub fn debtor(&self, id: i64) -> Result<Debtor, DataError> {
        self.tables
            .read()
            .deudores
            .iter()
            .find(|debtor| debtor.id == id)
            .cloned()
            .ok_or(DataError::NotFound {
                table: TableName::Deudores,
                id,
            })
    }
}

#[async_trait::async_trait]
impl TableSource for MemorySource {
    async fn debtors(&self) -> Result<Vec<Debtor>, DataError> {
        Ok(self.tables.read().deudores.clone())
    }

    async fn loans(&self) -> Result<Vec<Loan>, DataError> {
        Ok(self.tables.read().prestamos.clone())
    }

    async fn conciliations(&self) -> Result<Vec<Conciliation>, DataError> {
        Ok(self.tables.read().conciliaciones.clone())
    }

    async fn row_count(&self, table: TableName) -> Result<usize, DataError> {
        let tables = self.tables.read();
        Ok(match table {
            TableName::Deudores => tables.deudores.len(),
            TableName::Prestamos => tables.prestamos.len(),
            TableName::Conciliaciones => tables.conciliaciones.len(),
        })
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
