use crate::sources::RateSource;
use crate::types::{ExchangeRate, RawRate};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

/// Rates are not published on weekends and holidays; walking back one week
/// always crosses a business day without needing a holiday calendar.
const MAX_ATTEMPTS: u32 = 7;

/// `result` value of the lone-entry response meaning "no data for this date".
const NO_DATA_RESULT: i64 = 4;

/// Resolves "give me today's rates" into the most recent published record
/// set by probing backward one calendar day at a time.
pub struct RateFetcher {
    source: Box<dyn RateSource>,
}

impl RateFetcher {
    pub fn new(source: Box<dyn RateSource>) -> Self {
        Self { source }
    }

    /// Fetch the rates for `search_date` (today when absent), falling back
    /// up to a week. The first date that yields at least one valid record
    /// wins and its records are returned in response order. After seven
    /// fruitless attempts the result is empty; an empty sequence is the only
    /// failure signal callers see.
    pub async fn fetch(&self, search_date: Option<NaiveDate>) -> Vec<ExchangeRate> {
        let mut cursor = search_date.unwrap_or_else(|| Local::now().date_naive());

        for attempt in 1..=MAX_ATTEMPTS {
            match self.source.fetch_raw(cursor).await {
                Ok(entries) if is_no_data(&entries) => {
                    info!(
                        "[{}] no rates published for {}",
                        self.source.name(),
                        cursor.format("%Y%m%d")
                    );
                }
                Ok(entries) => {
                    let rates = parse_entries(&entries);
                    if !rates.is_empty() {
                        info!(
                            "[{}] {} rate(s) for {} (attempt {})",
                            self.source.name(),
                            rates.len(),
                            cursor.format("%Y%m%d"),
                            attempt
                        );
                        return rates;
                    }
                    warn!(
                        "[{}] no usable entries for {}",
                        self.source.name(),
                        cursor.format("%Y%m%d")
                    );
                }
                Err(e) => {
                    warn!(
                        "[{}] fetch failed for {}: {}",
                        self.source.name(),
                        cursor.format("%Y%m%d"),
                        e
                    );
                }
            }

            if attempt < MAX_ATTEMPTS {
                if let Some(prev) = cursor.pred_opt() {
                    cursor = prev;
                    info!("retrying previous day {}", cursor.format("%Y%m%d"));
                }
            }
        }

        warn!(
            "no exchange rates found within {} day(s); giving up",
            MAX_ATTEMPTS
        );
        Vec::new()
    }
}

/// An empty body and the lone `result == 4` entry both mean "market closed";
/// neither is a transport failure.
fn is_no_data(entries: &[serde_json::Value]) -> bool {
    match entries {
        [] => true,
        [only] => only.get("result").and_then(|v| v.as_i64()) == Some(NO_DATA_RESULT),
        _ => false,
    }
}

/// Convert the usable entries of one response. A bad entry never poisons
/// the batch: entries with a non-success result code and entries that fail
/// conversion are logged and skipped.
fn parse_entries(entries: &[serde_json::Value]) -> Vec<ExchangeRate> {
    let mut rates = Vec::new();

    for entry in entries {
        // Absent result means success; the API omits it on valid quotes.
        let result = entry.get("result").and_then(|v| v.as_i64()).unwrap_or(1);
        if result != 1 {
            let name = entry
                .get("cur_nm")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown Currency");
            warn!("entry '{}' failed (result code {}) — skipped", name, result);
            continue;
        }

        match serde_json::from_value::<RawRate>(entry.clone()) {
            Ok(raw) => rates.push(ExchangeRate::from(raw)),
            Err(e) => warn!("entry failed to parse ({}) — skipped: {}", e, entry),
        }
    }

    rates
}
