mod calculate;
mod catalog;
mod channels;
mod suggest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sellerops_core::ChannelType;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sellerops-cli")]
#[command(about = "Multi-channel pricing and profitability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List supported sales channels and the cost fields each one uses
    Channels {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Profit, margin and ROI for every enabled channel in the catalog
    Calculate {
        /// Catalog YAML to read (defaults to SELLEROPS_CATALOG_PATH)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Only calculate this product
        #[arg(long)]
        sku: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Suggest sale prices that hit target margins on one channel
    Suggest {
        /// Product SKU
        #[arg(long)]
        sku: String,
        /// Channel identifier, e.g. `amazon_fba`
        #[arg(long)]
        channel: ChannelType,
        /// Target margin percentage; repeat for several (defaults to SELLEROPS_MARGIN_PRESETS)
        #[arg(long = "margin")]
        margins: Vec<Decimal>,
        /// Catalog YAML to read (defaults to SELLEROPS_CATALOG_PATH)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Parse first so `--help` and usage errors never depend on the environment.
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = sellerops_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, command = ?cli.command, "starting");

    match cli.command {
        Some(Commands::Channels { json }) => channels::run_channels(json),
        Some(Commands::Calculate { catalog, sku, json }) => {
            calculate::run_calculate(&config, catalog.as_deref(), sku.as_deref(), json)
        }
        Some(Commands::Suggest {
            sku,
            channel,
            margins,
            catalog,
            json,
        }) => suggest::run_suggest(
            &config,
            &suggest::SuggestArgs {
                catalog: catalog.as_deref(),
                sku: &sku,
                channel,
                margins: &margins,
                json,
            },
        ),
        None => {
            println!("no command given; run `sellerops-cli --help` for usage");
            Ok(())
        }
    }
}
