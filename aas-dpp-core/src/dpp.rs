//! Digital Product Passport projection of an AAS record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{AasRecord, JsonObject};
use crate::submodel::{NAMEPLATE, TECHNICAL_DATA};

/// Version tag of the projected shape.
pub const DPP_SCHEMA: &str = "DPP-minimal-v0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DppRecord {
    pub product_id: String,
    pub nameplate: DppNameplate,
    pub technical_data: DppTechnicalData,
    pub links: DppLinks,
    pub meta: DppMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DppNameplate {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DppTechnicalData {
    pub power: Option<String>,
    pub weight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DppLinks {
    pub aas: String,
    #[serde(rename = "self")]
    pub self_: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DppMeta {
    pub schema: String,
}

/// Projects `record` into its public passport view.
///
/// Missing submodels and non-string fields project to `None`. `public_base`
/// is used as given; callers strip any trailing slash.
pub fn project(record: &AasRecord, public_base: &str) -> DppRecord {
    let empty = JsonObject::new();
    let nameplate = record.submodel(NAMEPLATE).unwrap_or(&empty);
    let tech = record.submodel(TECHNICAL_DATA).unwrap_or(&empty);

    DppRecord {
        product_id: record.id.clone(),
        nameplate: DppNameplate {
            manufacturer: string_field(nameplate, "manufacturer"),
            model: string_field(nameplate, "model"),
            serial_number: string_field(nameplate, "serialNumber"),
        },
        technical_data: DppTechnicalData {
            power: string_field(tech, "power"),
            weight: string_field(tech, "weight"),
        },
        links: DppLinks {
            aas: format!("{}/aas/{}", public_base, record.id),
            self_: format!("{}/dpp/{}", public_base, record.id),
        },
        meta: DppMeta {
            schema: DPP_SCHEMA.to_string(),
        },
    }
}

fn string_field(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
