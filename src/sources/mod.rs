pub mod eximbank;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Boundary to the rate publisher: one date in, the raw entry array out.
///
/// Implementations surface transport problems (network error, non-2xx
/// status, unparseable body) as errors; a "market closed" day is a normal
/// response the caller classifies, not an error.
#[async_trait]
pub trait RateSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_raw(&self, date: NaiveDate) -> Result<Vec<serde_json::Value>>;
}
