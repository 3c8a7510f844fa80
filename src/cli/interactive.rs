//! Interactive conversion session.
//!
//! Mirrors the single-window workflow: pick a source, type amounts,
//! swap the pair, and keep a short history. Conversion errors surface on
//! the result line, fetch errors on the status line; neither ends the
//! session, and a failed refresh keeps the previous snapshot.

use super::{rates, ui};
use crate::core::config::AppConfig;
use crate::core::history::ConversionHistory;
use crate::core::names::NameCatalog;
use crate::core::rates::{RateSnapshot, SourceId};
use crate::core::{ConvertError, convert};
use crate::providers::make_provider;
use anyhow::Result;
use chrono::Local;
use std::io::{BufRead, Write};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
enum Command {
    Convert {
        amount: String,
        pair: Option<(String, String)>,
    },
    From(String),
    To(String),
    Swap,
    Source(SourceId),
    Refresh,
    Rates,
    History,
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or_default();
    match head.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,
        "swap" => Command::Swap,
        "refresh" => Command::Refresh,
        "rates" => Command::Rates,
        "history" => Command::History,
        "clear" => Command::Clear,
        "from" => match parts.next() {
            Some(code) => Command::From(code.to_uppercase()),
            None => Command::Unknown(trimmed.to_string()),
        },
        "to" => match parts.next() {
            Some(code) => Command::To(code.to_uppercase()),
            None => Command::Unknown(trimmed.to_string()),
        },
        "source" => match parts.next().map(str::parse::<SourceId>) {
            Some(Ok(id)) => Command::Source(id),
            _ => Command::Unknown(trimmed.to_string()),
        },
        // Anything else is an amount; the engine validates it.
        _ => {
            let pair = match (parts.next(), parts.next()) {
                (Some(from), Some(to)) => Some((from.to_uppercase(), to.to_uppercase())),
                _ => None,
            };
            Command::Convert {
                amount: head.to_string(),
                pair,
            }
        }
    }
}

/// After a source switch the previous selection may be gone: a missing
/// `from` resets to the base, a missing `to` to RUB or the first code.
fn reset_selection(snapshot: &RateSnapshot, from: &mut String, to: &mut String) {
    if !snapshot.contains(from) {
        *from = snapshot.base().to_string();
    }
    if !snapshot.contains(to) {
        *to = if snapshot.contains("RUB") {
            "RUB".to_string()
        } else {
            snapshot
                .codes()
                .next()
                .map_or_else(|| snapshot.base().to_string(), str::to_string)
        };
    }
}

struct Session {
    config: AppConfig,
    catalog: Arc<NameCatalog>,
    source: SourceId,
    from: String,
    to: String,
    last_amount: Option<String>,
    snapshot: Option<RateSnapshot>,
    history: ConversionHistory,
}

impl Session {
    fn new(config: AppConfig, catalog: Arc<NameCatalog>, source: SourceId) -> Self {
        Session {
            config,
            catalog,
            source,
            from: "USD".to_string(),
            to: "RUB".to_string(),
            last_amount: None,
            snapshot: None,
            history: ConversionHistory::new(),
        }
    }

    async fn refresh(&mut self) {
        let provider = make_provider(self.source, &self.config, Arc::clone(&self.catalog));
        let spinner = ui::new_spinner("Refreshing rates...");
        let fetched = provider.fetch_rates().await;
        spinner.finish_and_clear();

        match fetched {
            Ok(snapshot) => {
                reset_selection(&snapshot, &mut self.from, &mut self.to);
                println!(
                    "{}",
                    ui::style_text(
                        &format!(
                            "{} | updated at {}",
                            snapshot.source(),
                            Local::now().format("%H:%M:%S")
                        ),
                        ui::StyleType::Status
                    )
                );
                self.snapshot = Some(snapshot);
            }
            Err(e) => {
                // Keep whatever snapshot we had.
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            }
        }
    }

    fn convert_current(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            println!(
                "{}",
                ui::style_text("No rates loaded; try 'refresh'", ui::StyleType::Error)
            );
            return;
        };
        let Some(amount) = &self.last_amount else {
            println!(
                "{}",
                ui::style_text(&ConvertError::EmptyAmount.to_string(), ui::StyleType::Error)
            );
            return;
        };

        match convert(amount, &self.from, &self.to, snapshot) {
            Ok(conversion) => {
                let line = conversion.display_line();
                println!("{}", ui::style_text(&line, ui::StyleType::Result));
                println!(
                    "{}",
                    ui::style_text(
                        &format!(
                            "{} -> {}",
                            super::display_name(snapshot, &self.catalog, &self.from),
                            super::display_name(snapshot, &self.catalog, &self.to)
                        ),
                        ui::StyleType::Subtle
                    )
                );
                self.history.push(line);
            }
            Err(e) => {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            }
        }
    }

    fn show_history(&self) {
        if self.history.is_empty() {
            println!("{}", ui::style_text("No conversions yet", ui::StyleType::Subtle));
            return;
        }
        for line in self.history.iter() {
            println!("{line}");
        }
    }

    fn show_help(&self) {
        println!("Commands:");
        println!("  <amount>              convert with the current pair ({} -> {})", self.from, self.to);
        println!("  <amount> <from> <to>  convert a specific pair");
        println!("  from <code>, to <code>, swap");
        println!("  source <id>           switch feed: cbr, exchangerate-api, frankfurter, coingecko");
        println!("  refresh, rates, history, clear, help, quit");
    }
}

/// Runs the interactive session until EOF or `quit`.
pub async fn run(config: &AppConfig, catalog: Arc<NameCatalog>, source: SourceId) -> Result<()> {
    let mut session = Session::new(config.clone(), catalog, source);

    println!("{}", ui::style_text("Currency converter", ui::StyleType::Title));
    session.refresh().await;
    println!(
        "{}",
        ui::style_text("Type an amount, or 'help' for commands", ui::StyleType::Subtle)
    );

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => {}
            Command::Help => session.show_help(),
            Command::Convert { amount, pair } => {
                if let Some((from, to)) = pair {
                    session.from = from;
                    session.to = to;
                }
                session.last_amount = Some(amount);
                session.convert_current();
            }
            Command::From(code) => {
                session.from = code;
                session.convert_current();
            }
            Command::To(code) => {
                session.to = code;
                session.convert_current();
            }
            Command::Swap => {
                std::mem::swap(&mut session.from, &mut session.to);
                session.convert_current();
            }
            Command::Source(id) => {
                session.source = id;
                session.refresh().await;
            }
            Command::Refresh => session.refresh().await,
            Command::Rates => match &session.snapshot {
                Some(snapshot) => println!("{}", rates::render_table(snapshot, &session.catalog)),
                None => println!(
                    "{}",
                    ui::style_text("No rates loaded; try 'refresh'", ui::StyleType::Error)
                ),
            },
            Command::History => session.show_history(),
            Command::Clear => {
                session.history.clear();
                println!("{}", ui::style_text("History cleared", ui::StyleType::Subtle));
            }
            Command::Unknown(input) => {
                println!(
                    "{}",
                    ui::style_text(&format!("Unrecognized input: {input}"), ui::StyleType::Error)
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{QuoteDirection, RateEntry};
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn flat_snapshot(base: &str, codes: &[&str]) -> RateSnapshot {
        let mut rates = BTreeMap::new();
        rates.insert(base.to_string(), RateEntry::Flat(Decimal::ONE));
        for code in codes {
            rates.insert((*code).to_string(), RateEntry::Flat(Decimal::TWO));
        }
        RateSnapshot::new(
            SourceId::ExchangeRateApi,
            base,
            QuoteDirection::BaseToForeign,
            rates,
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_parse_amount_only() {
        assert_eq!(
            parse_command("100,5\n"),
            Command::Convert {
                amount: "100,5".to_string(),
                pair: None
            }
        );
    }

    #[test]
    fn test_parse_amount_with_pair_uppercases_codes() {
        assert_eq!(
            parse_command("10 usd rub"),
            Command::Convert {
                amount: "10".to_string(),
                pair: Some(("USD".to_string(), "RUB".to_string()))
            }
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("swap"), Command::Swap);
        assert_eq!(parse_command("  quit "), Command::Quit);
        assert_eq!(parse_command("from eur"), Command::From("EUR".to_string()));
        assert_eq!(
            parse_command("source coingecko"),
            Command::Source(SourceId::CoinGecko)
        );
        assert_eq!(parse_command(""), Command::Empty);
    }

    #[test]
    fn test_parse_bad_source_is_unknown() {
        assert_eq!(
            parse_command("source moon"),
            Command::Unknown("source moon".to_string())
        );
        assert_eq!(parse_command("from"), Command::Unknown("from".to_string()));
    }

    #[test]
    fn test_garbage_falls_through_to_amount_validation() {
        // The engine classifies this as NotANumber.
        assert_eq!(
            parse_command("abc"),
            Command::Convert {
                amount: "abc".to_string(),
                pair: None
            }
        );
    }

    #[test]
    fn test_reset_selection_keeps_present_codes() {
        let snapshot = flat_snapshot("USD", &["EUR", "RUB"]);
        let mut from = "USD".to_string();
        let mut to = "EUR".to_string();
        reset_selection(&snapshot, &mut from, &mut to);
        assert_eq!(from, "USD");
        assert_eq!(to, "EUR");
    }

    #[test]
    fn test_reset_selection_falls_back_to_base_and_rub() {
        let snapshot = flat_snapshot("USD", &["EUR", "RUB"]);
        let mut from = "BTC".to_string();
        let mut to = "XXX".to_string();
        reset_selection(&snapshot, &mut from, &mut to);
        assert_eq!(from, "USD");
        assert_eq!(to, "RUB");
    }

    #[test]
    fn test_reset_selection_without_rub_uses_first_code() {
        let snapshot = flat_snapshot("EUR", &["GBP"]);
        let mut from = "EUR".to_string();
        let mut to = "XXX".to_string();
        reset_selection(&snapshot, &mut from, &mut to);
        // Codes are sorted; EUR comes first.
        assert_eq!(to, "EUR");
    }
}
