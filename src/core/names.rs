//! Human-readable currency names.
//!
//! A built-in code-to-name table used only for display, optionally
//! overlaid with entries from an external JSON resource file. Codes
//! without a known name display as themselves.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("AED", "UAE Dirham"),
    ("AMD", "Armenian Dram"),
    ("ARS", "Argentine Peso"),
    ("AUD", "Australian Dollar"),
    ("AZN", "Azerbaijani Manat"),
    ("BDT", "Bangladeshi Taka"),
    ("BGN", "Bulgarian Lev"),
    ("BHD", "Bahraini Dinar"),
    ("BRL", "Brazilian Real"),
    ("BTC", "Bitcoin"),
    ("BYN", "Belarusian Ruble"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CLP", "Chilean Peso"),
    ("CNY", "Chinese Yuan"),
    ("COP", "Colombian Peso"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("EGP", "Egyptian Pound"),
    ("ETH", "Ethereum"),
    ("EUR", "Euro"),
    ("GBP", "Pound Sterling"),
    ("GEL", "Georgian Lari"),
    ("HKD", "Hong Kong Dollar"),
    ("HUF", "Hungarian Forint"),
    ("IDR", "Indonesian Rupiah"),
    ("ILS", "Israeli New Shekel"),
    ("INR", "Indian Rupee"),
    ("ISK", "Icelandic Krona"),
    ("JPY", "Japanese Yen"),
    ("KGS", "Kyrgyzstani Som"),
    ("KRW", "South Korean Won"),
    ("KZT", "Kazakhstani Tenge"),
    ("MDL", "Moldovan Leu"),
    ("MXN", "Mexican Peso"),
    ("MYR", "Malaysian Ringgit"),
    ("NGN", "Nigerian Naira"),
    ("NOK", "Norwegian Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PHP", "Philippine Peso"),
    ("PKR", "Pakistani Rupee"),
    ("PLN", "Polish Zloty"),
    ("QAR", "Qatari Riyal"),
    ("RON", "Romanian Leu"),
    ("RSD", "Serbian Dinar"),
    ("RUB", "Russian Ruble"),
    ("SAR", "Saudi Riyal"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("THB", "Thai Baht"),
    ("TJS", "Tajikistani Somoni"),
    ("TMT", "Turkmenistani Manat"),
    ("TRY", "Turkish Lira"),
    ("TWD", "New Taiwan Dollar"),
    ("UAH", "Ukrainian Hryvnia"),
    ("USD", "US Dollar"),
    ("UZS", "Uzbekistani Som"),
    ("VND", "Vietnamese Dong"),
    ("XDR", "Special Drawing Rights"),
    ("ZAR", "South African Rand"),
];

/// Cosmetic code-to-name lookup, independent of any rate table.
#[derive(Debug, Clone, Default)]
pub struct NameCatalog {
    names: HashMap<String, String>,
}

impl NameCatalog {
    /// Catalog seeded with the built-in name table.
    pub fn builtin() -> Self {
        let names = BUILTIN_NAMES
            .iter()
            .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
            .collect();
        Self { names }
    }

    /// Merges names from a JSON file of the shape `{"USD": "US Dollar"}`.
    /// File entries win over built-in ones.
    pub fn load_overrides<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read names file: {}", path.display()))?;
        let overrides: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse names file: {}", path.display()))?;
        self.names.extend(overrides);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Name for a code, or the code itself when unknown.
    pub fn resolve(&self, code: &str) -> String {
        self.names
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}
