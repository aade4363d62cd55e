use aas_dpp::Config;
use aas_dpp_core::{AasRecord, DocumentStore};
use clap::{Args, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use super::OutputFormat;

#[derive(Args)]
pub struct AasCommand {
    #[command(subcommand)]
    pub command: AasSubcommand,
}

#[derive(Subcommand)]
pub enum AasSubcommand {
    /// Show the stored record
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Replace a submodel with a JSON payload
    Put {
        /// Submodel name (e.g. nameplate, technicalData)
        name: String,

        /// Read the payload from a file
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        file: Option<PathBuf>,

        /// Payload as inline JSON
        #[arg(long)]
        json: Option<String>,
    },
}

impl AasCommand {
    pub fn run(
        &self,
        store: &dyn DocumentStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let id = &config.asset_id.value;

        match &self.command {
            AasSubcommand::Show { format } => {
                let record = store.get(id)?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                    OutputFormat::Text => print!("{}", format_record(&record)),
                }
            }
            AasSubcommand::Put { name, file, json } => {
                let text = match (file, json) {
                    (Some(path), _) => std::fs::read_to_string(path)?,
                    (None, Some(json)) => json.clone(),
                    (None, None) => return Err("either --file or --json is required".into()),
                };
                let payload: Value = serde_json::from_str(&text)?;

                let ack = store.put_submodel(id, name, payload)?;
                println!("Updated submodel '{}' on AAS {}", ack.submodel, id);
            }
        }
        Ok(())
    }
}

/// Human-readable listing of every submodel and its fields.
fn format_record(record: &AasRecord) -> String {
    let title = format!("AAS {}", record.id);
    let mut out = format!("{}\n{}\n", title, "=".repeat(title.len()));

    for (name, submodel) in &record.submodels {
        out.push_str(&format!("\n{}\n", name));
        match submodel.as_object() {
            Some(fields) if !fields.is_empty() => {
                for (key, value) in fields {
                    out.push_str(&format!("  {}: {}\n", key, display_value(value)));
                }
            }
            _ => out.push_str("  (empty)\n"),
        }
    }

    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
