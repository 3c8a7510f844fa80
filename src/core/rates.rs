//! Normalized exchange-rate snapshot and the types it is built from.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Identifies one of the configured rate feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Cbr,
    ExchangeRateApi,
    Frankfurter,
    CoinGecko,
}

impl SourceId {
    pub const ALL: [SourceId; 4] = [
        SourceId::Cbr,
        SourceId::ExchangeRateApi,
        SourceId::Frankfurter,
        SourceId::CoinGecko,
    ];
}

impl Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SourceId::Cbr => "cbr",
                SourceId::ExchangeRateApi => "exchangerate-api",
                SourceId::Frankfurter => "frankfurter",
                SourceId::CoinGecko => "coingecko",
            }
        )
    }
}

impl FromStr for SourceId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cbr" => Ok(SourceId::Cbr),
            "exchangerate-api" | "exchangerate_api" => Ok(SourceId::ExchangeRateApi),
            "frankfurter" => Ok(SourceId::Frankfurter),
            "coingecko" => Ok(SourceId::CoinGecko),
            _ => Err(anyhow::anyhow!("Unknown rate source: {}", s)),
        }
    }
}

/// Which economic direction a snapshot's rates are quoted in.
///
/// `ForeignToBase`: each rate is how many base units one unit of the code
/// costs (central-bank style). `BaseToForeign`: each rate is how many units
/// of the code one base unit buys (aggregator style). The conversion
/// formula inverts between the two, so the engine dispatches on this flag
/// rather than on the source's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteDirection {
    ForeignToBase,
    BaseToForeign,
}

/// A single currency's rate as stored in the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum RateEntry {
    /// Lot pricing: `value` base units buy `nominal` units of the code.
    Ratio { value: Decimal, nominal: Decimal },
    /// Single multiplier against the base currency.
    Flat(Decimal),
}

impl RateEntry {
    /// Per-unit rate; ratio entries collapse to value/nominal.
    /// `None` when the entry cannot produce a usable rate (zero nominal).
    pub fn per_unit(&self) -> Option<Decimal> {
        match self {
            RateEntry::Ratio { value, nominal } => value.checked_div(*nominal),
            RateEntry::Flat(rate) => Some(*rate),
        }
    }

    /// The exact-unity entry every snapshot carries for its own base.
    pub fn identity() -> Self {
        RateEntry::Ratio {
            value: Decimal::ONE,
            nominal: Decimal::ONE,
        }
    }
}

/// Immutable result of one refresh: the rate table, the display names and
/// the base currency the rates are quoted against.
///
/// A refresh replaces the snapshot wholesale; nothing is merged across
/// sources. The table always contains its own base currency with a rate of
/// exactly 1 (the normalizers inject it).
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    source: SourceId,
    base: String,
    direction: QuoteDirection,
    rates: BTreeMap<String, RateEntry>,
    names: BTreeMap<String, String>,
}

impl RateSnapshot {
    pub fn new(
        source: SourceId,
        base: impl Into<String>,
        direction: QuoteDirection,
        rates: BTreeMap<String, RateEntry>,
        names: BTreeMap<String, String>,
    ) -> Self {
        let base = base.into();
        debug_assert!(
            rates
                .get(&base)
                .and_then(RateEntry::per_unit)
                .is_some_and(|r| r == Decimal::ONE),
            "snapshot must carry a unity entry for its base currency"
        );
        Self {
            source,
            base,
            direction,
            rates,
            names,
        }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn direction(&self) -> QuoteDirection {
        self.direction
    }

    pub fn entry(&self, code: &str) -> Option<&RateEntry> {
        self.rates.get(code)
    }

    /// Per-unit rate for a code, if present and usable.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).and_then(RateEntry::per_unit)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Currency codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Display name for a code; the code itself when no name was recorded.
    pub fn name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map_or(code, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
