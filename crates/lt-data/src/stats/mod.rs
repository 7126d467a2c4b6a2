//! Portfolio statistics shown on the dashboard cards

use serde::{Serialize, Deserialize};

use crate::schema::{Conciliation, ConciliationStatus, Loan, LoanStatus};

/// Aggregate figures over a set of loans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanStats {
    pub total_loans: usize,
    pub active: usize,
    pub paid: usize,
    pub overdue: usize,
    pub cancelled: usize,
    /// Principal lent, cancelled loans excluded
    pub total_principal: f64,
    /// Balance still owed on open loans
    pub outstanding_balance: f64,
    /// Balance owed on overdue loans
    pub overdue_balance: f64,
    /// Collected amount over total due, 0 when nothing is due
    pub collection_rate: f64,
}

impl LoanStats {
    /// Compute statistics for `loans`
    pub fn from_loans(loans: &[Loan]) -> Self {
        let mut stats = LoanStats {
            total_loans: loans.len(),
            ..Default::default()
        };
        let mut total_due = 0.0;
        let mut collected = 0.0;

        for loan in loans {
            match loan.status {
                LoanStatus::Active => stats.active += 1,
                LoanStatus::Paid => stats.paid += 1,
                LoanStatus::Overdue => stats.overdue += 1,
                LoanStatus::Cancelled => stats.cancelled += 1,
            }

            if loan.status == LoanStatus::Cancelled {
                continue;
            }

            stats.total_principal += loan.principal;
            total_due += loan.total_due();
            collected += loan.collected();

            if loan.status.is_open() {
                stats.outstanding_balance += loan.balance;
            }
            if loan.status == LoanStatus::Overdue {
                stats.overdue_balance += loan.balance;
            }
        }

        if total_due > 0.0 {
            stats.collection_rate = collected / total_due;
        }

        tracing::debug!(
            "Loan stats: {} loans, {} open, outstanding {:.2}",
            stats.total_loans,
            stats.open_loans(),
            stats.outstanding_balance
        );

        stats
    }

    pub fn open_loans(&self) -> usize {
        self.active + self.overdue
    }

    /// Share of open loans that are overdue
    pub fn overdue_ratio(&self) -> f64 {
        match self.open_loans() {
            0 => 0.0,
            open => self.overdue as f64 / open as f64,
        }
    }
}

/// Totals over a set of cash reconciliations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConciliationSummary {
    pub records: usize,
    pub expected: f64,
    pub collected: f64,
    pub expenses: f64,
    /// Sum of per-record differences, negative when money is missing
    pub difference: f64,
    pub shortfalls: usize,
}

impl ConciliationSummary {
    pub fn from_records(records: &[Conciliation]) -> Self {
        records.iter().fold(
            ConciliationSummary {
                records: records.len(),
                ..Default::default()
            },
            |mut summary, record| {
                summary.expected += record.expected_amount;
                summary.collected += record.collected_amount;
                summary.expenses += record.expenses;
                summary.difference += record.difference();
                if record.status() == ConciliationStatus::Shortfall {
                    summary.shortfalls += 1;
                }
                summary
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn loan(id: i64, principal: f64, balance: f64, status: LoanStatus) -> Loan {
        Loan {
            id,
            debtor_id: id,
            principal,
            interest_rate: 0.0,
            installments: 10,
            installment_amount: principal / 10.0,
            balance,
            status,
            issued_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_loan_stats() {
        let loans = vec![
            loan(1, 100.0, 40.0, LoanStatus::Active),
            loan(2, 200.0, 200.0, LoanStatus::Overdue),
            loan(3, 100.0, 0.0, LoanStatus::Paid),
            loan(4, 500.0, 500.0, LoanStatus::Cancelled),
        ];
        let stats = LoanStats::from_loans(&loans);

        assert_eq!(stats.total_loans, 4);
        assert_eq!(stats.open_loans(), 2);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.total_principal, 400.0);
        assert_eq!(stats.outstanding_balance, 240.0);
        assert_eq!(stats.overdue_balance, 200.0);
        // Collected 60 + 0 + 100 out of 400 due
        assert!((stats.collection_rate - 0.4).abs() < 1e-9);
        assert!((stats.overdue_ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_portfolio() {
        let stats = LoanStats::from_loans(&[]);
        assert_eq!(stats, LoanStats::default());
        assert_eq!(stats.overdue_ratio(), 0.0);
    }

    #[test]
    fn test_conciliation_summary() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let records = vec![
            Conciliation {
                id: 1,
                collector: "Rosa".to_string(),
                route: None,
                date: day,
                expected_amount: 300.0,
                collected_amount: 290.0,
                expenses: 20.0,
                notes: None,
            },
            Conciliation {
                id: 2,
                collector: "Mario".to_string(),
                route: None,
                date: day,
                expected_amount: 150.0,
                collected_amount: 150.0,
                expenses: 0.0,
                notes: Some("fuel paid by office".to_string()),
            },
        ];
        let summary = ConciliationSummary::from_records(&records);

        assert_eq!(summary.records, 2);
        assert_eq!(summary.expected, 450.0);
        assert_eq!(summary.expenses, 20.0);
        assert_eq!(summary.difference, -30.0);
        assert_eq!(summary.shortfalls, 1);
    }
}
