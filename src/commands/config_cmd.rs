use clap::{Args, Subcommand};

use super::OutputFormat;
use aas_dpp::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("port: {}", config.port.value);
                        println!("  source: {}", config.port.source);
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("public_base_url: {}", config.public_base_url.value);
                        println!("  source: {}", config.public_base_url.source);
                        println!();

                        let key = if config.api_key.value.is_some() {
                            "(set)"
                        } else {
                            "(not set)"
                        };
                        println!("api_key: {}", key);
                        println!("  source: {}", config.api_key.source);
                        println!();

                        println!("asset_id: {}", config.asset_id.value);
                        println!("  source: {}", config.asset_id.source);
                    }
                }
                Ok(())
            }
        }
    }
}
