use super::ui;
use crate::core::convert;
use crate::core::names::NameCatalog;
use crate::providers::RateProvider;
use anyhow::Result;
use chrono::Local;

/// One-shot conversion: refresh the source, convert, print the result and
/// a status line.
pub async fn run(
    amount: &str,
    from: &str,
    to: &str,
    provider: &dyn RateProvider,
    catalog: &NameCatalog,
) -> Result<()> {
    let from = from.to_uppercase();
    let to = to.to_uppercase();

    let spinner = ui::new_spinner("Refreshing rates...");
    let fetched = provider.fetch_rates().await;
    spinner.finish_and_clear();

    let snapshot = match fetched {
        Ok(snapshot) => snapshot,
        Err(e) => {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            return Err(e.into());
        }
    };

    match convert(amount, &from, &to, &snapshot) {
        Ok(conversion) => {
            println!(
                "{}",
                ui::style_text(&conversion.display_line(), ui::StyleType::Result)
            );
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "{} -> {}",
                        super::display_name(&snapshot, catalog, &from),
                        super::display_name(&snapshot, catalog, &to)
                    ),
                    ui::StyleType::Subtle
                )
            );
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "{} | updated at {}",
                        snapshot.source(),
                        Local::now().format("%H:%M:%S")
                    ),
                    ui::StyleType::Subtle
                )
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            Err(e.into())
        }
    }
}
