//! The conversion engine: exact decimal arithmetic over a rate snapshot.

use super::format::format_grouped;
use super::rates::{QuoteDirection, RateSnapshot};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Everything that can go wrong turning user input into a converted value.
/// Each variant carries its own short user-facing message; these surface on
/// the result line and are never fatal.
#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("Enter an amount")]
    EmptyAmount,
    #[error("Enter a number")]
    NotANumber,
    #[error("Enter an amount > 0")]
    NonPositiveAmount,
    #[error("No rate data for {0}")]
    UnknownCurrency(String),
    #[error("Calculation error")]
    Calculation,
}

/// A completed conversion holding the exact decimal values.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: Decimal,
    pub from: String,
    pub to: String,
    /// Rounded half-up to four fractional digits.
    pub result: Decimal,
}

impl Conversion {
    /// Renders the result line, e.g. `100,00 USD = 9 000,0000 RUB`.
    pub fn display_line(&self) -> String {
        format!(
            "{} {} = {} {}",
            format_grouped(self.amount, 2),
            self.from,
            format_grouped(self.result, 4),
            self.to
        )
    }
}

/// Parses an amount typed by the user. A comma is accepted as the decimal
/// separator. Validation happens before any rate lookup.
pub fn parse_amount(input: &str) -> Result<Decimal, ConvertError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() || normalized == "." {
        return Err(ConvertError::EmptyAmount);
    }
    let amount = Decimal::from_str(&normalized).map_err(|_| ConvertError::NotANumber)?;
    if amount <= Decimal::ZERO {
        return Err(ConvertError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Converts `input` units of `from` into `to` using the snapshot's rates.
///
/// Identity conversions return the amount without touching the table, even
/// when the code is absent from it. Otherwise both per-unit rates are
/// resolved and combined according to the snapshot's quote direction:
/// rates quoted into the base multiply by the source rate and divide by the
/// target; rates quoted out of the base invert that ratio.
pub fn convert(
    input: &str,
    from: &str,
    to: &str,
    snapshot: &RateSnapshot,
) -> Result<Conversion, ConvertError> {
    let amount = parse_amount(input)?;

    let raw = if from == to {
        amount
    } else {
        let from_rate = resolve_rate(snapshot, from)?;
        let to_rate = resolve_rate(snapshot, to)?;
        let (numerator, denominator) = match snapshot.direction() {
            QuoteDirection::ForeignToBase => (from_rate, to_rate),
            QuoteDirection::BaseToForeign => (to_rate, from_rate),
        };
        amount
            .checked_mul(numerator)
            .and_then(|value| value.checked_div(denominator))
            .ok_or(ConvertError::Calculation)?
    };

    let result = raw.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    Ok(Conversion {
        amount,
        from: from.to_string(),
        to: to.to_string(),
        result,
    })
}

fn resolve_rate(snapshot: &RateSnapshot, code: &str) -> Result<Decimal, ConvertError> {
    let entry = snapshot
        .entry(code)
        .ok_or_else(|| ConvertError::UnknownCurrency(code.to_string()))?;
    entry.per_unit().ok_or(ConvertError::Calculation)
}
