//! The persisted Asset Administration Shell record.
//!
//! On disk the record looks like:
//!
//! ```text
//! {
//!   "id": "1",
//!   "submodels": {
//!     "nameplate": { "manufacturer": "...", "model": "...", "serialNumber": "..." },
//!     "technicalData": { "power": null, "weight": null },
//!     "<any other name>": { ... }
//!   }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::submodel::{Nameplate, TechnicalData, NAMEPLATE, TECHNICAL_DATA};

/// A JSON object with insertion-ordered keys.
pub type JsonObject = serde_json::Map<String, Value>;

/// Id of the single asset this service manages.
pub const DEFAULT_ASSET_ID: &str = "1";

/// An AAS record: an id plus named submodels.
///
/// Every value in `submodels` is a JSON object; deserialization rejects
/// anything else so a malformed file is treated as corrupted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AasRecord {
    pub id: String,
    #[serde(default, deserialize_with = "object_values")]
    pub submodels: JsonObject,
}

impl AasRecord {
    /// Creates a record with no submodels.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            submodels: JsonObject::new(),
        }
    }

    /// The record seeded when no usable backing file exists.
    pub fn default_for(id: impl Into<String>) -> Self {
        let nameplate = Nameplate {
            manufacturer: "Unknown".to_string(),
            model: "Unknown".to_string(),
            serial_number: "SN-0000".to_string(),
        };

        Self::new(id)
            .with_submodel(NAMEPLATE, nameplate.into_object())
            .with_submodel(TECHNICAL_DATA, TechnicalData::default().into_object())
    }

    pub fn with_submodel(mut self, name: impl Into<String>, submodel: JsonObject) -> Self {
        self.set_submodel(name, submodel);
        self
    }

    /// Replaces a submodel wholesale. Existing fields are not merged.
    pub fn set_submodel(&mut self, name: impl Into<String>, submodel: JsonObject) {
        self.submodels.insert(name.into(), Value::Object(submodel));
    }

    pub fn submodel(&self, name: &str) -> Option<&JsonObject> {
        self.submodels.get(name).and_then(Value::as_object)
    }

    pub fn submodel_names(&self) -> impl Iterator<Item = &str> {
        self.submodels.keys().map(String::as_str)
    }
}

fn object_values<'de, D>(deserializer: D) -> Result<JsonObject, D::Error>
where
    D: Deserializer<'de>,
{
    let map = JsonObject::deserialize(deserializer)?;
    if let Some((name, _)) = map.iter().find(|(_, v)| !v.is_object()) {
        return Err(serde::de::Error::custom(format!(
            "submodel '{}' is not a JSON object",
            name
        )));
    }
    Ok(map)
}
