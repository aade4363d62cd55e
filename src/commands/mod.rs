pub mod aas;
pub mod config_cmd;
pub mod dpp;
pub mod qrcode_cmd;

use clap::ValueEnum;

pub use aas::AasCommand;
pub use config_cmd::ConfigCommand;
pub use dpp::DppCommand;
pub use qrcode_cmd::QrcodeCommand;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
