pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::names::NameCatalog;
use crate::core::rates::SourceId;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Commands the application can execute.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
        source: Option<String>,
    },
    Rates {
        source: Option<String>,
    },
    Interactive {
        source: Option<String>,
    },
}

fn resolve_source(requested: Option<&str>, config: &AppConfig) -> Result<SourceId> {
    let name = requested.unwrap_or(&config.default_source);
    name.parse()
        .with_context(|| format!("Invalid rate source: {name}"))
}

fn build_catalog(config: &AppConfig) -> Result<NameCatalog> {
    let mut catalog = NameCatalog::builtin();
    if let Some(path) = &config.names_path {
        catalog.load_overrides(path)?;
    }
    Ok(catalog)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = Arc::new(build_catalog(&config)?);

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            source,
        } => {
            let id = resolve_source(source.as_deref(), &config)?;
            let provider = providers::make_provider(id, &config, Arc::clone(&catalog));
            cli::convert::run(&amount, &from, &to, provider.as_ref(), &catalog).await
        }
        AppCommand::Rates { source } => {
            let id = resolve_source(source.as_deref(), &config)?;
            let provider = providers::make_provider(id, &config, Arc::clone(&catalog));
            cli::rates::run(provider.as_ref(), &catalog).await
        }
        AppCommand::Interactive { source } => {
            let id = resolve_source(source.as_deref(), &config)?;
            cli::interactive::run(&config, catalog, id).await
        }
    }
}
