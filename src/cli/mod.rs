//! Command-line presentation layer.

pub mod convert;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::names::NameCatalog;
use crate::core::rates::RateSnapshot;

/// Display name for a code: the feed-provided name when the snapshot has
/// one, then the static catalog, then the code itself.
pub(crate) fn display_name(snapshot: &RateSnapshot, catalog: &NameCatalog, code: &str) -> String {
    let from_feed = snapshot.name(code);
    if from_feed != code {
        from_feed.to_string()
    } else {
        catalog.resolve(code)
    }
}
