use super::RateSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

const BASE_URL: &str = "https://oapi.koreaexim.go.kr/site/program/financial/exchangeJSON";

/// Discriminator for the exchange-rate listing; the endpoint also serves
/// loan and international interest rates under other values.
const DATA_KIND: &str = "AP01";

pub struct Eximbank {
    client: reqwest::Client,
    authkey: String,
}

impl Eximbank {
    pub fn new(client: reqwest::Client, authkey: String) -> Self {
        Self { client, authkey }
    }
}

#[async_trait]
impl RateSource for Eximbank {
    fn name(&self) -> &str {
        "eximbank"
    }

    async fn fetch_raw(&self, date: NaiveDate) -> Result<Vec<serde_json::Value>> {
        let searchdate = date.format("%Y%m%d").to_string();

        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("authkey", self.authkey.as_str()),
                ("searchdate", searchdate.as_str()),
                ("data", DATA_KIND),
            ])
            .send()
            .await
            .with_context(|| format!("Eximbank request failed for {}", searchdate))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Eximbank HTTP {}: {}", status, body);
        }

        let entries: Vec<serde_json::Value> = resp
            .json()
            .await
            .with_context(|| format!("Eximbank parse failed for {}", searchdate))?;

        Ok(entries)
    }
}
