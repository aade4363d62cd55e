use aas_dpp::qr;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct QrcodeCommand {
    /// Absolute http(s) URL to encode
    pub target: String,

    /// Output PNG file
    #[arg(long, short, default_value = "qrcode.png")]
    pub output: PathBuf,
}

impl QrcodeCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let png = qr::render_png(&self.target)?;
        std::fs::write(&self.output, png)?;
        println!("Wrote {}", self.output.display());
        Ok(())
    }
}
