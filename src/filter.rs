use crate::types::ExchangeRate;
use std::collections::HashMap;

/// Keep the records whose currency is visible. Codes absent from the
/// mapping are visible by default; relative order is preserved.
pub fn visible(all: &[ExchangeRate], visibility: &HashMap<String, bool>) -> Vec<ExchangeRate> {
    all.iter()
        .filter(|rate| visibility.get(&rate.currency_code).copied().unwrap_or(true))
        .cloned()
        .collect()
}
