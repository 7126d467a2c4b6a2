//! Statistic cards and the loan statistics panel

use serde::{Serialize, Deserialize};
use serde_json::{json, Value};

use lt_data::{ConciliationSummary, DataError, LoanStats, TableName, TableSource};

use crate::{DashboardView, ViewId, Variant};

/// Raw figure shown on a card; formatting is up to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum StatValue {
    Count(usize),
    Amount(f64),
    /// Fraction in `[0, 1]`
    Percent(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: StatValue,
    pub variant: Variant,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: StatValue, variant: Variant) -> Self {
        Self {
            title: title.into(),
            value,
            variant,
        }
    }
}

/// Collection rates at or above this are healthy
const HEALTHY_COLLECTION_RATE: f64 = 0.8;
/// Collection rates below this are alarming
const LOW_COLLECTION_RATE: f64 = 0.5;

fn collection_variant(rate: f64) -> Variant {
    if rate >= HEALTHY_COLLECTION_RATE {
        Variant::Success
    } else if rate >= LOW_COLLECTION_RATE {
        Variant::Warning
    } else {
        Variant::Danger
    }
}

/// Cards summarizing the loan portfolio
pub fn loan_cards(stats: &LoanStats, show_overdue_balance: bool) -> Vec<StatCard> {
    let overdue_variant = if stats.overdue > 0 { Variant::Danger } else { Variant::Success };

    let mut cards = vec![
        StatCard::new("Total loans", StatValue::Count(stats.total_loans), Variant::Default),
        StatCard::new("Active loans", StatValue::Count(stats.active), Variant::Info),
        StatCard::new("Overdue loans", StatValue::Count(stats.overdue), overdue_variant),
        StatCard::new("Total lent", StatValue::Amount(stats.total_principal), Variant::Default),
        StatCard::new("Outstanding", StatValue::Amount(stats.outstanding_balance), Variant::Warning),
    ];

    if show_overdue_balance {
        cards.push(StatCard::new(
            "Overdue balance",
            StatValue::Amount(stats.overdue_balance),
            overdue_variant,
        ));
    }

    cards.push(StatCard::new(
        "Collection rate",
        StatValue::Percent(stats.collection_rate),
        collection_variant(stats.collection_rate),
    ));
    cards
}

/// Cards summarizing collectors' cash reconciliations
pub fn conciliation_cards(summary: &ConciliationSummary) -> Vec<StatCard> {
    let difference_variant = if summary.difference < 0.0 {
        Variant::Danger
    } else {
        Variant::Success
    };

    vec![
        StatCard::new("Expected", StatValue::Amount(summary.expected), Variant::Default),
        StatCard::new("Collected", StatValue::Amount(summary.collected), Variant::Info),
        StatCard::new("Expenses", StatValue::Amount(summary.expenses), Variant::Warning),
        StatCard::new("Difference", StatValue::Amount(summary.difference), difference_variant),
        StatCard::new(
            "Shortfalls",
            StatValue::Count(summary.shortfalls),
            if summary.shortfalls > 0 { Variant::Danger } else { Variant::Success },
        ),
    ]
}

/// Dashboard panel with loan statistics cards
pub struct LoanStatsPanel {
    id: ViewId,
    title: String,
    pub show_overdue_balance: bool,

    // Cached statistics
    cached_stats: Option<LoanStats>,
}

impl LoanStatsPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ViewId::new_v4(),
            title: title.into(),
            show_overdue_balance: true,
            cached_stats: None,
        }
    }

    /// Recompute statistics from the `prestamos` table
    pub async fn refresh(&mut self, source: &dyn TableSource) -> Result<&LoanStats, DataError> {
        let loans = source.loans().await.map_err(|e| {
            tracing::error!("Failed to fetch {}: {}", TableName::Prestamos, e);
            e
        })?;
        Ok(&*self.cached_stats.insert(LoanStats::from_loans(&loans)))
    }

    pub fn set_stats(&mut self, stats: LoanStats) {
        self.cached_stats = Some(stats);
    }

    pub fn stats(&self) -> Option<&LoanStats> {
        self.cached_stats.as_ref()
    }

    /// Cards for the last computed statistics, empty before the first refresh
    pub fn cards(&self) -> Vec<StatCard> {
        self.cached_stats
            .as_ref()
            .map(|stats| loan_cards(stats, self.show_overdue_balance))
            .unwrap_or_default()
    }
}

impl DashboardView for LoanStatsPanel {
    fn id(&self) -> ViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "LoanStatsPanel"
    }

    fn save_config(&self) -> Value {
        json!({
            "show_overdue_balance": self.show_overdue_balance,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(show) = config.get("show_overdue_balance").and_then(|v| v.as_bool()) {
            self.show_overdue_balance = show;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(overdue: usize, collection_rate: f64) -> LoanStats {
        LoanStats {
            total_loans: 10,
            active: 6,
            paid: 4 - overdue.min(4),
            overdue,
            cancelled: 0,
            total_principal: 5000.0,
            outstanding_balance: 2100.0,
            overdue_balance: 300.0,
            collection_rate,
        }
    }

    #[test]
    fn test_card_variants() {
        let cards = loan_cards(&stats(2, 0.9), true);
        let overdue = cards.iter().find(|c| c.title == "Overdue loans").unwrap();
        let rate = cards.iter().find(|c| c.title == "Collection rate").unwrap();

        assert_eq!(overdue.variant, Variant::Danger);
        assert_eq!(overdue.value, StatValue::Count(2));
        assert_eq!(rate.variant, Variant::Success);
        assert_eq!(cards.len(), 7);
    }

    #[test]
    fn test_collection_rate_thresholds() {
        assert_eq!(collection_variant(0.8), Variant::Success);
        assert_eq!(collection_variant(0.6), Variant::Warning);
        assert_eq!(collection_variant(0.1), Variant::Danger);
    }

    #[test]
    fn test_panel_hides_overdue_balance() {
        let mut panel = LoanStatsPanel::new("Portfolio");
        assert!(panel.cards().is_empty());

        panel.load_config(json!({ "show_overdue_balance": false }));
        panel.set_stats(stats(0, 0.4));
        let cards = panel.cards();

        assert_eq!(cards.len(), 6);
        assert!(cards.iter().all(|c| c.title != "Overdue balance"));
        assert_eq!(cards[2].variant, Variant::Success);
    }

    #[test]
    fn test_stat_value_json_shape() {
        let json = serde_json::to_value(StatValue::Percent(0.25)).unwrap();
        assert_eq!(json, json!({ "kind": "percent", "value": 0.25 }));
    }

    #[tokio::test]
    async fn test_refresh_from_source() {
        let source = lt_data::MemorySource::from_json(
            "fixture",
            r#"{ "prestamos": [
                { "id": 1, "debtor_id": 1, "principal": 100.0, "interest_rate": 0.0,
                  "installments": 4, "installment_amount": 25.0, "balance": 50.0,
                  "status": "overdue", "issued_on": "2024-01-10" }
            ] }"#,
        )
        .unwrap();

        let mut panel = LoanStatsPanel::new("Portfolio");
        let stats = panel.refresh(&source).await.unwrap();
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.overdue_balance, 50.0);
        assert_eq!(panel.cards()[2].variant, Variant::Danger);
    }
}
