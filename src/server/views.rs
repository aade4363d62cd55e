//! HTML views of the passport and the printable label.
//!
//! Templates are compiled into the binary and rendered with Handlebars,
//! which HTML-escapes every interpolated value.

use aas_dpp_core::{AasRecord, DppRecord, JsonObject, NAMEPLATE};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

const DPP_TEMPLATE: &str = include_str!("../../templates/dpp.html");
const LABEL_TEMPLATE: &str = include_str!("../../templates/label.html");

/// Stylesheet served at `/static/style.css`.
pub const STYLE_CSS: &str = include_str!("../../templates/style.css");

/// Compiled view templates.
pub struct Views {
    handlebars: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("dpp", DPP_TEMPLATE)?;
        handlebars.register_template_string("label", LABEL_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    pub fn render_dpp(
        &self,
        dpp: &DppRecord,
        public_base: &str,
        qrcode_url: &str,
    ) -> Result<String, RenderError> {
        self.handlebars.render(
            "dpp",
            &json!({
                "dpp": dpp,
                "public_base": public_base,
                "qrcode_url": qrcode_url,
            }),
        )
    }

    /// Renders the label from the raw nameplate submodel.
    pub fn render_label(
        &self,
        record: &AasRecord,
        public_base: &str,
        qrcode_url: &str,
    ) -> Result<String, RenderError> {
        let empty = JsonObject::new();
        let nameplate = record.submodel(NAMEPLATE).unwrap_or(&empty);

        self.handlebars.render(
            "label",
            &json!({
                "asset_id": record.id,
                "nameplate": nameplate,
                "public_base": public_base,
                "qrcode_url": qrcode_url,
            }),
        )
    }
}

/// URL of the QR image that points at the passport of `asset_id`.
pub fn qrcode_url(public_base: &str, asset_id: &str) -> String {
    let target = format!("{}/dpp/{}", public_base, asset_id);
    format!(
        "{}/qrcode?target={}",
        public_base,
        urlencoding::encode(&target)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aas_dpp_core::project;

    #[test]
    fn test_qrcode_url_encodes_target() {
        assert_eq!(
            qrcode_url("http://x", "1"),
            "http://x/qrcode?target=http%3A%2F%2Fx%2Fdpp%2F1"
        );
    }

    #[test]
    fn test_render_dpp() {
        let views = Views::new().unwrap();
        let record = AasRecord::default_for("1");
        let dpp = project(&record, "http://x");

        let html = views
            .render_dpp(&dpp, "http://x", &qrcode_url("http://x", "1"))
            .unwrap();

        assert!(html.contains("Digital Product Passport - ID 1"));
        assert!(html.contains("SN-0000"));
        assert!(html.contains("DPP-minimal-v0"));
        assert!(html.contains("http://x/dpp/1"));
    }

    #[test]
    fn test_render_label_escapes_html() {
        let views = Views::new().unwrap();
        let record = AasRecord::new("1").with_submodel(
            NAMEPLATE,
            json!({ "manufacturer": "<b>ACME</b>", "model": "X", "serialNumber": "S" })
                .as_object()
                .unwrap()
                .clone(),
        );

        let html = views.render_label(&record, "http://x", "http://x/qr").unwrap();

        assert!(html.contains("&lt;b&gt;ACME&lt;/b&gt;"));
        assert!(!html.contains("<b>ACME</b>"));
        assert!(html.contains("SN: S"));
    }

    #[test]
    fn test_render_label_without_nameplate() {
        let views = Views::new().unwrap();
        let html = views
            .render_label(&AasRecord::new("1"), "http://x", "http://x/qr")
            .unwrap();
        assert!(html.contains("SN: </div>"));
    }
}
