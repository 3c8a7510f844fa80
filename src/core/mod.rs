//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod format;
pub mod history;
pub mod log;
pub mod names;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{Conversion, ConvertError, convert, parse_amount};
pub use history::ConversionHistory;
pub use names::NameCatalog;
pub use rates::{QuoteDirection, RateEntry, RateSnapshot, SourceId};
