use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use valuta::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for valuta::AppCommand {
    fn from(cmd: Commands) -> valuta::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                source,
            } => valuta::AppCommand::Convert {
                amount,
                from,
                to,
                source,
            },
            Commands::Rates { source } => valuta::AppCommand::Rates { source },
            Commands::Interactive { source } => valuta::AppCommand::Interactive { source },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert; a comma decimal separator is accepted
        amount: String,
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
        /// Rate source: cbr, exchangerate-api, frankfurter, coingecko
        #[arg(short, long)]
        source: Option<String>,
    },
    /// List the normalized rate table of a source
    Rates {
        /// Rate source: cbr, exchangerate-api, frankfurter, coingecko
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Start an interactive conversion session
    Interactive {
        /// Rate source: cbr, exchangerate-api, frankfurter, coingecko
        #[arg(short, long)]
        source: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => valuta::cli::setup::setup(),
        Some(cmd) => valuta::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
