//! Submodel payloads and their write-path validation.
//!
//! Two submodel names are recognized and validated: `nameplate` and
//! `technicalData`. Anything else is stored verbatim as long as it is a
//! JSON object.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::StoreError;
use crate::record::JsonObject;

pub const NAMEPLATE: &str = "nameplate";
pub const TECHNICAL_DATA: &str = "technicalData";

static WATT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)watts?\b").expect("watt pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Identity fields of the asset. All three are required and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameplate {
    pub manufacturer: String,
    pub model: String,
    #[serde(rename = "serialNumber")]
    pub serial_number: String,
}

impl Nameplate {
    /// Validates a raw payload. Unknown keys are dropped.
    pub fn from_payload(payload: &Value) -> Result<Self, StoreError> {
        let obj = payload_object(NAMEPLATE, payload)?;

        Ok(Self {
            manufacturer: required_str(obj, "manufacturer")?,
            model: required_str(obj, "model")?,
            serial_number: required_str(obj, "serialNumber")?,
        })
    }

    pub fn into_object(self) -> JsonObject {
        let mut obj = JsonObject::new();
        obj.insert("manufacturer".into(), Value::String(self.manufacturer));
        obj.insert("model".into(), Value::String(self.model));
        obj.insert("serialNumber".into(), Value::String(self.serial_number));
        obj
    }
}

/// Optional technical characteristics, stored as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalData {
    pub power: Option<String>,
    pub weight: Option<String>,
}

impl TechnicalData {
    /// Validates a raw payload. Absent and null fields both become `None`.
    pub fn from_payload(payload: &Value) -> Result<Self, StoreError> {
        let obj = payload_object(TECHNICAL_DATA, payload)?;

        Ok(Self {
            power: optional_str(obj, "power")?,
            weight: optional_str(obj, "weight")?,
        })
    }

    /// Applies unit spelling normalization to both fields.
    pub fn normalized(self) -> Self {
        Self {
            power: self.power.as_deref().map(normalize_power),
            weight: self.weight.as_deref().map(normalize_weight),
        }
    }

    /// Both keys are always present; missing values serialize as `null`.
    pub fn into_object(self) -> JsonObject {
        let mut obj = JsonObject::new();
        obj.insert("power".into(), self.power.map_or(Value::Null, Value::String));
        obj.insert("weight".into(), self.weight.map_or(Value::Null, Value::String));
        obj
    }
}

/// A submodel payload dispatched by name at the write boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Submodel {
    Nameplate(Nameplate),
    TechnicalData(TechnicalData),
    Opaque(JsonObject),
}

impl Submodel {
    /// Validates `payload` for the submodel called `name`.
    ///
    /// `technicalData` comes back already unit-normalized.
    pub fn parse(name: &str, payload: Value) -> Result<Self, StoreError> {
        match name {
            NAMEPLATE => Nameplate::from_payload(&payload).map(Submodel::Nameplate),
            TECHNICAL_DATA => TechnicalData::from_payload(&payload)
                .map(|tech| Submodel::TechnicalData(tech.normalized())),
            _ => match payload {
                Value::Object(obj) => Ok(Submodel::Opaque(obj)),
                other => Err(StoreError::BadRequest(format!(
                    "payload for submodel '{}' must be a JSON object, got {}",
                    name,
                    kind(&other)
                ))),
            },
        }
    }

    pub fn into_object(self) -> JsonObject {
        match self {
            Submodel::Nameplate(nameplate) => nameplate.into_object(),
            Submodel::TechnicalData(tech) => tech.into_object(),
            Submodel::Opaque(obj) => obj,
        }
    }
}

/// Rewrites `Watt`/`Watts` in any case to `W` and tidies whitespace.
pub fn normalize_power(power: &str) -> String {
    collapse_whitespace(&WATT.replace_all(power, "W"))
}

/// Rewrites `kgs` and `KG` to `kg` and tidies whitespace.
pub fn normalize_weight(weight: &str) -> String {
    collapse_whitespace(&weight.replace("kgs", "kg").replace("KG", "kg"))
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

fn payload_object<'a>(name: &str, payload: &'a Value) -> Result<&'a JsonObject, StoreError> {
    payload.as_object().ok_or_else(|| {
        StoreError::Validation(format!(
            "{} payload must be a JSON object, got {}",
            name,
            kind(payload)
        ))
    })
}

fn required_str(obj: &JsonObject, field: &str) -> Result<String, StoreError> {
    match obj.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(StoreError::Validation(format!(
            "{} must not be empty",
            field
        ))),
        None | Some(Value::Null) => Err(StoreError::Validation(format!("{} is required", field))),
        Some(other) => Err(StoreError::Validation(format!(
            "{} must be a string, got {}",
            field,
            kind(other)
        ))),
    }
}

fn optional_str(obj: &JsonObject, field: &str) -> Result<Option<String>, StoreError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(StoreError::Validation(format!(
            "{} must be a string or null, got {}",
            field,
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
