//! Loan tracker dashboard, text front end
//!
//! Loads dashboard settings and a table snapshot (or generates demo data),
//! then walks the client roster page by page and prints the statistics and
//! conciliation views.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lt_core::events::events::{PageAutoCorrected, PageChanged};
use lt_core::{handler_from_fn, DashboardSettings, EventBus};
use lt_data::{MemorySource, TableSource};
use lt_views::{ClientRoster, ConciliationTable, LoanStatsPanel, StatCard, StatValue};

mod sample;

/// Number of demo clients generated when no snapshot is given
const SAMPLE_DEBTORS: usize = 37;

/// Walk the client roster, loan statistics and conciliations as text
#[derive(Parser, Debug)]
#[command(name = "loan-tracker", version)]
struct Options {
    /// Dashboard settings file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Table snapshot to load instead of demo data
    #[arg(long)]
    data: Option<PathBuf>,

    /// Override the default page size from the settings
    #[arg(long)]
    page_size: Option<usize>,

    /// Write the snapshot to this file and exit
    #[arg(long)]
    write_sample: Option<PathBuf>,
}

fn card_line(card: &StatCard) -> String {
    let value = match card.value {
        StatValue::Count(n) => n.to_string(),
        StatValue::Amount(amount) => format!("{:.2}", amount),
        StatValue::Percent(fraction) => format!("{:.1}%", fraction * 100.0),
    };
    format!("  [{:?}] {}: {}", card.variant, card.title, value)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = Options::parse();

    let mut settings = match &options.settings {
        Some(path) => DashboardSettings::load(path)
            .with_context(|| format!("Failed to load settings from {:?}", path))?,
        None => DashboardSettings::default(),
    };
    if let Some(page_size) = options.page_size {
        settings.default_page_size = page_size;
        settings.validate().context("Invalid --page-size")?;
    }

    let source = match &options.data {
        Some(path) => MemorySource::from_path(path)
            .with_context(|| format!("Failed to load snapshot {:?}", path))?,
        None => {
            info!("No snapshot given, generating {} demo clients", SAMPLE_DEBTORS);
            MemorySource::new("demo", sample::generate_snapshot(SAMPLE_DEBTORS))
        }
    };

    if let Some(path) = &options.write_sample {
        source
            .save(path)
            .with_context(|| format!("Failed to write snapshot {:?}", path))?;
        info!("Snapshot written to {:?}", path);
        return Ok(());
    }

    info!("Starting loan tracker with source '{}'", source.source_name());

    let bus = Arc::new(EventBus::new());
    bus.subscribe::<PageChanged>(handler_from_fn(|event| {
        if let Some(change) = event.as_any().downcast_ref::<PageChanged>() {
            debug!("{} moved to page {} of {}", change.view_name, change.to_page, change.total_pages);
        }
    }));
    bus.subscribe::<PageAutoCorrected>(handler_from_fn(|event| {
        if let Some(correction) = event.as_any().downcast_ref::<PageAutoCorrected>() {
            info!("{} reset from stale page {}", correction.view_name, correction.stale_page);
        }
    }));

    // Loan statistics
    let mut stats_panel = LoanStatsPanel::new("Portfolio");
    stats_panel
        .refresh(&source)
        .await
        .context("Failed to compute loan statistics")?;
    println!("== Portfolio ==");
    for card in stats_panel.cards() {
        println!("{}", card_line(&card));
    }
    println!();

    // Client roster, every page
    let mut roster = ClientRoster::new(&settings).with_events(bus.clone());
    roster.refresh(&source).await.context("Failed to load clients")?;
    loop {
        println!("{}\n", roster.frame().to_text());
        if !roster.table().next_page() {
            break;
        }
    }

    // Conciliations, first page and totals
    let mut conciliations = ConciliationTable::new(&settings).with_events(bus);
    conciliations
        .refresh(&source)
        .await
        .context("Failed to load conciliations")?;
    println!("{}", conciliations.frame().to_text());
    for card in conciliations.summary_cards() {
        println!("{}", card_line(&card));
    }

    Ok(())
}
