use serde::{Deserialize, Serialize};

/// One currency's quote for the resolved trade date, as published by the
/// Korea Eximbank exchange-rate listing (`data=AP01`).
///
/// All published figures are kept as the formatted strings the API returns
/// (e.g. "1,303.00"); the rates are surfaced as-is, never computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Per-entry status code; `1` means a valid quote.
    pub result: i64,
    /// Short identifier, e.g. "USD". Unique within one fetch's record set.
    pub currency_code: String,
    pub currency_name: String,
    /// Telegraphic transfer rates (receiving / sending).
    pub telegraphic_buy_rate: String,
    pub telegraphic_sell_rate: String,
    /// Benchmark trading rate; the primary displayed value.
    pub deal_base_rate: String,
    pub book_price: String,
    pub annual_exchange_commission_rate: String,
    pub ten_day_exchange_commission_rate: String,
    /// Figures published via the KFTC brokerage benchmark.
    pub brokerage_book_price: String,
    pub brokerage_deal_base_rate: String,
}

/// Wire view of one entry of the API response array.
///
/// `cur_unit`, `cur_nm` and `deal_bas_r` are mandatory; the API occasionally
/// omits everything else, including `result` itself (absent means success).
#[derive(Debug, Deserialize)]
pub struct RawRate {
    #[serde(default = "default_result")]
    pub result: i64,
    pub cur_unit: String,
    pub cur_nm: String,
    #[serde(default)]
    pub ttb: String,
    #[serde(default)]
    pub tts: String,
    pub deal_bas_r: String,
    #[serde(default)]
    pub bkpr: String,
    #[serde(default)]
    pub yy_efee_r: String,
    #[serde(default)]
    pub ten_dd_efee_r: String,
    #[serde(default)]
    pub kftc_bkpr: String,
    #[serde(default)]
    pub kftc_deal_bas_r: String,
}

fn default_result() -> i64 {
    1
}

impl From<RawRate> for ExchangeRate {
    fn from(raw: RawRate) -> Self {
        Self {
            result: raw.result,
            currency_code: raw.cur_unit,
            currency_name: raw.cur_nm,
            telegraphic_buy_rate: raw.ttb,
            telegraphic_sell_rate: raw.tts,
            deal_base_rate: raw.deal_bas_r,
            book_price: raw.bkpr,
            annual_exchange_commission_rate: raw.yy_efee_r,
            ten_day_exchange_commission_rate: raw.ten_dd_efee_r,
            brokerage_book_price: raw.kftc_bkpr,
            brokerage_deal_base_rate: raw.kftc_deal_bas_r,
        }
    }
}

#[cfg(test)]
impl ExchangeRate {
    /// Minimal valid record for tests that only care about the code.
    pub(crate) fn sample(currency_code: &str, currency_name: &str) -> Self {
        Self {
            result: 1,
            currency_code: currency_code.to_string(),
            currency_name: currency_name.to_string(),
            telegraphic_buy_rate: "1,290.00".to_string(),
            telegraphic_sell_rate: "1,316.00".to_string(),
            deal_base_rate: "1,303.00".to_string(),
            book_price: "1,303".to_string(),
            annual_exchange_commission_rate: "1.75".to_string(),
            ten_day_exchange_commission_rate: "0.04".to_string(),
            brokerage_book_price: "1,303".to_string(),
            brokerage_deal_base_rate: "1,303.00".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_rate_maps_wire_fields() {
        let raw: RawRate = serde_json::from_value(json!({
            "result": 1,
            "cur_unit": "USD",
            "cur_nm": "US Dollar",
            "ttb": "1,290.00",
            "tts": "1,316.00",
            "deal_bas_r": "1,303.00",
            "bkpr": "1,303",
            "yy_efee_r": "1.75",
            "ten_dd_efee_r": "0.04",
            "kftc_bkpr": "1,302",
            "kftc_deal_bas_r": "1,302.50"
        }))
        .unwrap();

        let rate = ExchangeRate::from(raw);
        assert_eq!(rate.currency_code, "USD");
        assert_eq!(rate.currency_name, "US Dollar");
        assert_eq!(rate.telegraphic_buy_rate, "1,290.00");
        assert_eq!(rate.telegraphic_sell_rate, "1,316.00");
        assert_eq!(rate.deal_base_rate, "1,303.00");
        assert_eq!(rate.book_price, "1,303");
        assert_eq!(rate.brokerage_book_price, "1,302");
        assert_eq!(rate.brokerage_deal_base_rate, "1,302.50");
    }

    #[test]
    fn missing_result_defaults_to_success() {
        let raw: RawRate = serde_json::from_value(json!({
            "cur_unit": "EUR",
            "cur_nm": "Euro",
            "deal_bas_r": "1,420.00"
        }))
        .unwrap();

        assert_eq!(raw.result, 1);
        assert_eq!(raw.ttb, "");
    }

    #[test]
    fn missing_mandatory_field_is_an_error() {
        // No deal_bas_r: the entry is not convertible into a record.
        let raw = serde_json::from_value::<RawRate>(json!({
            "cur_unit": "EUR",
            "cur_nm": "Euro"
        }));
        assert!(raw.is_err());
    }
}
