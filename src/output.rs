use crate::types::ExchangeRate;
use anyhow::{Context, Result};
use std::collections::HashMap;

pub fn print_table(rates: &[ExchangeRate]) {
    println!(
        "\n{:<10} {:<26} {:<12} {:<12} {:<12} {:<12}",
        "Currency", "Name", "TT Buy", "TT Sell", "Base Rate", "Book Price"
    );
    println!("{}", "-".repeat(88));
    for rate in rates {
        println!(
            "{:<10} {:<26} {:<12} {:<12} {:<12} {:<12}",
            rate.currency_code,
            rate.currency_name,
            rate.telegraphic_buy_rate,
            rate.telegraphic_sell_rate,
            rate.deal_base_rate,
            rate.book_price
        );
    }
    println!();
}

pub fn print_json(rates: &[ExchangeRate]) -> Result<()> {
    let json = serde_json::to_string_pretty(rates).context("serializing exchange rates")?;
    println!("{}", json);
    Ok(())
}

/// Every published figure of a single currency, one per line.
pub fn print_detail(rate: &ExchangeRate) {
    println!("\n{} ({})", rate.currency_name, rate.currency_code);
    println!("{}", "-".repeat(48));
    println!("{:<34} {}", "Telegraphic transfer buy", rate.telegraphic_buy_rate);
    println!("{:<34} {}", "Telegraphic transfer sell", rate.telegraphic_sell_rate);
    println!("{:<34} {}", "Deal base rate", rate.deal_base_rate);
    println!("{:<34} {}", "Book price", rate.book_price);
    println!(
        "{:<34} {}",
        "Annual exchange commission rate", rate.annual_exchange_commission_rate
    );
    println!(
        "{:<34} {}",
        "10-day exchange commission rate", rate.ten_day_exchange_commission_rate
    );
    println!("{:<34} {}", "KFTC book price", rate.brokerage_book_price);
    println!("{:<34} {}", "KFTC deal base rate", rate.brokerage_deal_base_rate);
    println!();
}

/// Picker listing: every fetched currency with its current visibility.
pub fn print_currencies(currencies: &[(String, String)], visibility: &HashMap<String, bool>) {
    println!("\n{:<10} {:<30} {}", "Currency", "Name", "Shown");
    println!("{}", "-".repeat(48));
    for (code, name) in currencies {
        let shown = visibility.get(code).copied().unwrap_or(true);
        println!(
            "{:<10} {:<30} {}",
            code,
            name,
            if shown { "yes" } else { "no" }
        );
    }
    println!();
}
