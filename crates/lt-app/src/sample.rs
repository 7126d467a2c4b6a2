//! Generate a sample snapshot with demo data

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rand::Rng;

use lt_data::sources::Snapshot;
use lt_data::{Conciliation, Debtor, Loan, LoanStatus};

const FIRST_NAMES: [&str; 8] = ["Ana", "Luis", "María", "José", "Carmen", "Pedro", "Lucía", "Jorge"];
const LAST_NAMES: [&str; 8] = ["Pérez", "Gómez", "Rodríguez", "López", "Díaz", "Torres", "Ramírez", "Vargas"];
const ROUTES: [&str; 4] = ["Norte", "Sur", "Centro", "Occidente"];
const COLLECTORS: [&str; 3] = ["Rosa", "Mario", "Camilo"];

/// Build a snapshot with `debtors` clients, roughly one loan each
pub fn generate_snapshot(debtors: usize) -> Snapshot {
    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

    let deudores: Vec<Debtor> = (0..debtors)
        .map(|i| {
            let id = i as i64 + 1;
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            Debtor {
                id,
                full_name: format!("{} {}", first, last),
                document: format!("{}", rng.gen_range(10_000_000..99_999_999)),
                phone: Some(format!("300{:07}", rng.gen_range(0..10_000_000))),
                address: None,
                route: Some(ROUTES[i % ROUTES.len()].to_string()),
                active: rng.gen_bool(0.9),
                created_at: Utc
                    .timestamp_opt(1_704_067_200 + id * 86_400, 0)
                    .single()
                    .unwrap_or_else(Utc::now),
            }
        })
        .collect();

    let prestamos: Vec<Loan> = deudores
        .iter()
        .map(|debtor| {
            let principal = (rng.gen_range(10..=100) * 50) as f64;
            let interest_rate = 20.0;
            let installments = 20;
            let total_due = principal * (1.0 + interest_rate / 100.0);
            let paid_installments = rng.gen_range(0..=installments);

            let status = match rng.gen_range(0..10) {
                0 => LoanStatus::Cancelled,
                1 | 2 => LoanStatus::Overdue,
                _ if paid_installments == installments => LoanStatus::Paid,
                _ => LoanStatus::Active,
            };
            let installment_amount = total_due / installments as f64;
            let balance = match status {
                LoanStatus::Paid => 0.0,
                _ => total_due - installment_amount * paid_installments as f64,
            };

            Loan {
                id: debtor.id + 1000,
                debtor_id: debtor.id,
                principal,
                interest_rate,
                installments,
                installment_amount,
                balance,
                status,
                issued_on: start + Duration::days(rng.gen_range(0..120)),
            }
        })
        .collect();

    let conciliaciones: Vec<Conciliation> = (0..14)
        .flat_map(|day| COLLECTORS.iter().enumerate().map(move |(c, collector)| (day, c, *collector)))
        .enumerate()
        .map(|(i, (day, c, collector))| {
            let expected = (rng.gen_range(20..60) * 10) as f64;
            let expenses = (rng.gen_range(0..5) * 5) as f64;
            let collected = match rng.gen_range(0..6) {
                0 => expected + expenses - 20.0,
                1 => expected + expenses + 10.0,
                _ => expected + expenses,
            };
            Conciliation {
                id: i as i64 + 1,
                collector: collector.to_string(),
                route: Some(ROUTES[c % ROUTES.len()].to_string()),
                date: start + Duration::days(day),
                expected_amount: expected,
                collected_amount: collected,
                expenses,
                notes: None,
            }
        })
        .collect();

    Snapshot {
        deudores,
        prestamos,
        conciliaciones,
    }
}
