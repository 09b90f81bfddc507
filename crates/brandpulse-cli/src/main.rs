mod keywords;
mod kpi;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::keywords::KeywordCommands;
use crate::kpi::KpiCommands;

#[derive(Debug, Parser)]
#[command(name = "brandpulse")]
#[command(about = "Brand popularity, trend and keyword analytics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Popularity index, trend labels and KPI summaries
    Kpi {
        #[command(subcommand)]
        command: KpiCommands,
    },
    /// Keyword clustering, similarity search and key-phrase extraction
    Keywords {
        #[command(subcommand)]
        command: KeywordCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = brandpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Kpi { command }) => kpi::run(&config, command).await,
        Some(Commands::Keywords { command }) => keywords::run(&config, command),
        None => {
            println!("brandpulse ready ({} environment); see --help", config.env);
            Ok(())
        }
    }
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("failed to render output: {e}"))?;
    println!("{rendered}");
    Ok(())
}
