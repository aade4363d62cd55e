use aas_dpp::Config;
use aas_dpp_core::JsonFileStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{AasCommand, ConfigCommand, DppCommand, QrcodeCommand};

#[derive(Parser)]
#[command(name = "aas-dpp")]
#[command(version)]
#[command(about = "Inspect and edit the AAS record and its Digital Product Passport", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the AAS record
    Aas(AasCommand),

    /// Show the Digital Product Passport
    Dpp(DppCommand),

    /// Write a QR code PNG for a URL
    Qrcode(QrcodeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    // Store diagnostics (e.g. a regenerated record) go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aas_dpp_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Aas(cmd)) => {
            let store = open_store(&config)?;
            cmd.run(&store, &config)?;
        }
        Some(Commands::Dpp(cmd)) => {
            let store = open_store(&config)?;
            cmd.run(&store, &config)?;
        }
        Some(Commands::Qrcode(cmd)) => {
            cmd.run()?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<JsonFileStore, aas_dpp_core::StoreError> {
    JsonFileStore::new(&config.data_dir.value, &config.asset_id.value)
}
