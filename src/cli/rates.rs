use super::ui;
use crate::core::names::NameCatalog;
use crate::core::rates::RateSnapshot;
use crate::providers::RateProvider;
use anyhow::Result;
use comfy_table::Cell;

/// Renders a snapshot's rate table for display.
pub fn render_table(snapshot: &RateSnapshot, catalog: &NameCatalog) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Rate ({})", snapshot.base())),
    ]);

    for code in snapshot.codes() {
        let rate = snapshot
            .rate(code)
            .map_or("N/A".to_string(), |r| r.normalize().to_string());
        table.add_row(vec![
            Cell::new(code),
            Cell::new(super::display_name(snapshot, catalog, code)),
            ui::value_cell(&rate),
        ]);
    }

    format!(
        "{} ({} currencies, quoted against {})\n\n{}",
        ui::style_text(&snapshot.source().to_string(), ui::StyleType::Title),
        snapshot.len(),
        snapshot.base(),
        table
    )
}

/// Fetches the source and lists its normalized rate table.
pub async fn run(provider: &dyn RateProvider, catalog: &NameCatalog) -> Result<()> {
    let spinner = ui::new_spinner("Refreshing rates...");
    let fetched = provider.fetch_rates().await;
    spinner.finish_and_clear();

    match fetched {
        Ok(snapshot) => {
            println!("{}", render_table(&snapshot, catalog));
            Ok(())
        }
        Err(e) => {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            Err(e.into())
        }
    }
}
