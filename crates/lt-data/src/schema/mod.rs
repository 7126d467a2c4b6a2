//! Typed rows of the remote tables

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Deserialize};

use crate::DataError;

/// Remote tables the dashboard reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableName {
    Deudores,
    Prestamos,
    Conciliaciones,
}

impl TableName {
    pub const ALL: [TableName; 3] = [
        TableName::Deudores,
        TableName::Prestamos,
        TableName::Conciliaciones,
    ];

    /// Name of the table on the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Deudores => "deudores",
            TableName::Prestamos => "prestamos",
            TableName::Conciliaciones => "conciliaciones",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::ALL
            .into_iter()
            .find(|table| table.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DataError::UnknownTable(s.to_string()))
    }
}

/// A client who owes money (`deudores`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debtor {
    pub id: i64,
    pub full_name: String,
    pub document: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Collection route the client belongs to
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Lifecycle of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Paid,
    Overdue,
    Cancelled,
}

impl LoanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::Paid => "Paid",
            LoanStatus::Overdue => "Overdue",
            LoanStatus::Cancelled => "Cancelled",
        }
    }

    /// Whether the loan still has money to collect
    pub fn is_open(&self) -> bool {
        matches!(self, LoanStatus::Active | LoanStatus::Overdue)
    }
}

/// A loan granted to a debtor (`prestamos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub debtor_id: i64,
    pub principal: f64,
    /// Interest rate in percent over the whole loan
    pub interest_rate: f64,
    pub installments: u32,
    pub installment_amount: f64,
    /// Amount still owed
    pub balance: f64,
    pub status: LoanStatus,
    pub issued_on: NaiveDate,
}

impl Loan {
    /// Principal plus interest
    pub fn total_due(&self) -> f64 {
        self.principal * (1.0 + self.interest_rate / 100.0)
    }

    /// Amount already paid back
    pub fn collected(&self) -> f64 {
        (self.total_due() - self.balance).max(0.0)
    }
}

/// How a collector's delivered cash compares to what was expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConciliationStatus {
    Balanced,
    Surplus,
    Shortfall,
}

/// Cash reconciliation for one collector on one day (`conciliaciones`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conciliation {
    pub id: i64,
    pub collector: String,
    #[serde(default)]
    pub route: Option<String>,
    pub date: NaiveDate,
    pub expected_amount: f64,
    pub collected_amount: f64,
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Differences smaller than this are rounding noise
const BALANCE_TOLERANCE: f64 = 0.005;

impl Conciliation {
    /// Cash handed in after route expenses
    pub fn net_delivered(&self) -> f64 {
        self.collected_amount - self.expenses
    }

    /// Positive when the collector delivered more than expected
    pub fn difference(&self) -> f64 {
        self.net_delivered() - self.expected_amount
    }

    pub fn status(&self) -> ConciliationStatus {
        let difference = self.difference();
        if difference.abs() < BALANCE_TOLERANCE {
            ConciliationStatus::Balanced
        } else if difference > 0.0 {
            ConciliationStatus::Surplus
        } else {
            ConciliationStatus::Shortfall
        }
    }
}
