use aas_dpp::Config;
use aas_dpp_core::{project, DocumentStore, DppRecord};
use clap::{Args, Subcommand};

use super::OutputFormat;

#[derive(Args)]
pub struct DppCommand {
    #[command(subcommand)]
    pub command: DppSubcommand,
}

#[derive(Subcommand)]
pub enum DppSubcommand {
    /// Show the passport projection of the stored record
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl DppCommand {
    pub fn run(
        &self,
        store: &dyn DocumentStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DppSubcommand::Show { format } => {
                let record = store.get(&config.asset_id.value)?;
                let dpp = project(&record, &config.public_base_url.value);
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dpp)?),
                    OutputFormat::Text => print!("{}", format_dpp(&dpp)),
                }
                Ok(())
            }
        }
    }
}

fn format_dpp(dpp: &DppRecord) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let title = format!("Digital Product Passport {}", dpp.product_id);

    let mut out = format!("{}\n{}\n\n", title, "=".repeat(title.len()));
    out.push_str(&format!("Manufacturer: {}\n", field(&dpp.nameplate.manufacturer)));
    out.push_str(&format!("Model:        {}\n", field(&dpp.nameplate.model)));
    out.push_str(&format!("Serial:       {}\n", field(&dpp.nameplate.serial_number)));
    out.push_str(&format!("Power:        {}\n", field(&dpp.technical_data.power)));
    out.push_str(&format!("Weight:       {}\n", field(&dpp.technical_data.weight)));
    out.push_str(&format!("\nAAS:  {}\n", dpp.links.aas));
    out.push_str(&format!("Self: {}\n", dpp.links.self_));
    out.push_str(&format!("Schema: {}\n", dpp.meta.schema));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use aas_dpp_core::AasRecord;

    #[test]
    fn test_format_dpp() {
        let dpp = project(&AasRecord::default_for("1"), "http://x");
        let text = format_dpp(&dpp);

        assert!(text.contains("Serial:       SN-0000\n"));
        assert!(text.contains("Power:        -\n"));
        assert!(text.contains("Self: http://x/dpp/1\n"));
        assert!(text.contains("Schema: DPP-minimal-v0\n"));
    }
}
