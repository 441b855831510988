use crate::fetcher::RateFetcher;
use crate::filter;
use crate::settings::SettingsStore;
use crate::types::ExchangeRate;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use tracing::warn;

/// Notifications pushed to the presentation layer. A front end registers
/// the sending half of a channel at construction and drains the receiving
/// half; no widget toolkit is assumed on the other side.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// The filtered record set to display.
    RatesChanged(Vec<ExchangeRate>),
    /// Human-readable progress/result line.
    StatusChanged(String),
    /// Full code/name list of the last fetch plus the current visibility
    /// mapping, for populating a currency picker.
    AvailableCurrenciesChanged {
        currencies: Vec<(String, String)>,
        visibility: HashMap<String, bool>,
    },
}

/// Mediates between the presentation layer and the fetch/settings machinery:
/// holds the last full record set and the visibility mapping, persists every
/// mapping change write-through, and re-emits what the front end shows.
pub struct RateViewModel {
    fetcher: RateFetcher,
    store: SettingsStore,
    all_rates: Vec<ExchangeRate>,
    visibility: HashMap<String, bool>,
    events: Sender<ViewEvent>,
}

impl RateViewModel {
    pub fn new(fetcher: RateFetcher, store: SettingsStore, events: Sender<ViewEvent>) -> Self {
        let visibility = store.load();
        Self {
            fetcher,
            store,
            all_rates: Vec::new(),
            visibility,
            events,
        }
    }

    /// Fetch a fresh record set and re-emit everything derived from it.
    ///
    /// On the first successful fetch with an empty mapping, every fetched
    /// currency is seeded visible and persisted immediately, so partial
    /// views are possible without a prior manual action.
    pub async fn fetch_rates(&mut self, search_date: Option<NaiveDate>) {
        self.emit(ViewEvent::StatusChanged(
            "Fetching exchange rates...".to_string(),
        ));

        self.all_rates = self.fetcher.fetch(search_date).await;

        if self.visibility.is_empty() && !self.all_rates.is_empty() {
            for rate in &self.all_rates {
                self.visibility.insert(rate.currency_code.clone(), true);
            }
            self.persist();
        }

        self.emit_rates();
        self.emit_currencies();

        let status = if self.all_rates.is_empty() {
            "Could not retrieve exchange rates.".to_string()
        } else {
            format!("Loaded {} exchange rate(s).", self.all_rates.len())
        };
        self.emit(ViewEvent::StatusChanged(status));
    }

    pub fn set_visibility(&mut self, currency_code: &str, is_visible: bool) {
        self.visibility
            .insert(currency_code.to_string(), is_visible);
        self.persist();
        self.emit_rates();
        self.emit_currencies();
    }

    /// Mark every currency of the last fetch visible. Codes never seen in
    /// any fetch keep whatever value they already had.
    pub fn select_all(&mut self) {
        self.set_all(true);
    }

    /// Mark every currency of the last fetch hidden; never-seen codes keep
    /// their stored value.
    pub fn deselect_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, visible: bool) {
        for rate in &self.all_rates {
            self.visibility.insert(rate.currency_code.clone(), visible);
        }
        self.persist();
        self.emit_rates();
        self.emit_currencies();
    }

    pub fn visible_rates(&self) -> Vec<ExchangeRate> {
        filter::visible(&self.all_rates, &self.visibility)
    }

    pub fn all_rates(&self) -> &[ExchangeRate] {
        &self.all_rates
    }

    pub fn visibility(&self) -> &HashMap<String, bool> {
        &self.visibility
    }

    pub fn rate_by_currency(&self, currency_code: &str) -> Option<&ExchangeRate> {
        self.all_rates
            .iter()
            .find(|rate| rate.currency_code == currency_code)
    }

    fn emit_rates(&self) {
        self.emit(ViewEvent::RatesChanged(self.visible_rates()));
    }

    fn emit_currencies(&self) {
        let currencies = self
            .all_rates
            .iter()
            .filter(|rate| rate.result == 1)
            .map(|rate| (rate.currency_code.clone(), rate.currency_name.clone()))
            .collect();
        self.emit(ViewEvent::AvailableCurrenciesChanged {
            currencies,
            visibility: self.visibility.clone(),
        });
    }

    fn emit(&self, event: ViewEvent) {
        // A gone receiver only means the front end stopped listening.
        let _ = self.events.send(event);
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.visibility) {
            warn!("failed to persist visibility settings: {:#}", e);
        }
    }
}
