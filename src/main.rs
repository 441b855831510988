mod fetcher;
mod filter;
mod output;
mod settings;
mod sources;
mod types;
mod viewmodel;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;
use tracing::info;

use crate::fetcher::RateFetcher;
use crate::settings::SettingsStore;
use crate::sources::eximbank::Eximbank;
use crate::viewmodel::{RateViewModel, ViewEvent};

#[derive(Parser, Debug)]
#[command(
    name = "exim-rates",
    about = "Fetch Korea Eximbank daily exchange rates, filter them by saved per-currency visibility, and display the result"
)]
struct Args {
    /// Date to query (YYYYMMDD); defaults to today. Days without published
    /// rates fall back up to a week.
    #[arg(short, long)]
    date: Option<String>,

    /// Output format: "table" (default) or "json"
    #[arg(short, long, default_value = "table")]
    output: String,

    /// Path to the visibility settings file
    #[arg(short, long, default_value = "settings.yaml")]
    settings: PathBuf,

    /// Print every published figure of a single currency (e.g. USD)
    #[arg(short, long)]
    currency: Option<String>,

    /// List the fetched currencies with their visibility instead of the rates
    #[arg(short, long)]
    list: bool,

    /// Mark a currency visible (repeatable)
    #[arg(long, value_name = "CODE")]
    show: Vec<String>,

    /// Mark a currency hidden (repeatable)
    #[arg(long, value_name = "CODE")]
    hide: Vec<String>,

    /// Mark every fetched currency visible
    #[arg(long, conflicts_with = "deselect_all")]
    select_all: bool,

    /// Mark every fetched currency hidden
    #[arg(long, conflicts_with = "select_all")]
    deselect_all: bool,

    /// Display all fetched currencies regardless of saved visibility
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let search_date = args
        .date
        .as_deref()
        .map(|date| {
            NaiveDate::parse_from_str(date, "%Y%m%d")
                .with_context(|| format!("invalid --date '{}', expected YYYYMMDD", date))
        })
        .transpose()?;

    let authkey = std::env::var("AUTH_KEY").context(
        "AUTH_KEY not set; put the Korea Eximbank API key in the environment or a .env file",
    )?;

    let client = reqwest::Client::builder()
        .user_agent("exim-rates/0.1")
        .build()
        .context("building HTTP client")?;

    let fetcher = RateFetcher::new(Box::new(Eximbank::new(client, authkey)));
    let store = SettingsStore::new(&args.settings);

    let (event_tx, event_rx) = mpsc::channel::<ViewEvent>();
    let mut viewmodel = RateViewModel::new(fetcher, store, event_tx);

    viewmodel.fetch_rates(search_date).await;

    for code in &args.show {
        viewmodel.set_visibility(&code.to_uppercase(), true);
    }
    for code in &args.hide {
        viewmodel.set_visibility(&code.to_uppercase(), false);
    }
    if args.select_all {
        viewmodel.select_all();
    }
    if args.deselect_all {
        viewmodel.deselect_all();
    }

    // Drain the boundary events: status lines go to the log, the latest
    // record set and picker payloads drive what is printed below.
    let mut filtered = Vec::new();
    let mut currencies = Vec::new();
    let mut visibility = HashMap::new();
    while let Ok(event) = event_rx.try_recv() {
        match event {
            ViewEvent::StatusChanged(status) => info!("{}", status),
            ViewEvent::RatesChanged(rates) => filtered = rates,
            ViewEvent::AvailableCurrenciesChanged {
                currencies: codes,
                visibility: mapping,
            } => {
                currencies = codes;
                visibility = mapping;
            }
        }
    }

    if let Some(code) = &args.currency {
        let code = code.to_uppercase();
        match viewmodel.rate_by_currency(&code) {
            Some(rate) => output::print_detail(rate),
            None => anyhow::bail!("no rate for currency '{}' in the fetched set", code),
        }
        return Ok(());
    }

    if args.list {
        output::print_currencies(&currencies, &visibility);
        return Ok(());
    }

    let rates = if args.all {
        viewmodel.all_rates().to_vec()
    } else {
        filtered
    };

    if rates.is_empty() {
        println!("Could not retrieve exchange rates.");
        return Ok(());
    }

    match args.output.as_str() {
        "json" => output::print_json(&rates)?,
        _ => output::print_table(&rates),
    }

    Ok(())
}
