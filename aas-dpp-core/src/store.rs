//! Single-record document storage.
//!
//! The AAS record lives in one JSON file:
//! ```text
//! <DATA_DIR>/
//!   aas_<asset_id>.json
//! ```
//!
//! Every read goes back to disk and every write is a read-modify-write of
//! the whole file. There is no locking; the last write wins.

use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::record::AasRecord;
use crate::submodel::Submodel;

/// Acknowledgment returned after a submodel write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmodelAck {
    pub ok: bool,
    pub submodel: String,
}

/// Storage for the AAS record.
///
/// Backends implement `load` and `save`; lookups and submodel writes are
/// built on those two so every backend shares the same id policy and
/// payload dispatch.
pub trait DocumentStore: Send + Sync {
    /// Id of the record this store serves.
    fn asset_id(&self) -> &str;

    /// Loads the record, seeding or repairing the backing storage if needed.
    fn load(&self) -> Result<AasRecord, StoreError>;

    /// Overwrites the stored record.
    fn save(&self, record: &AasRecord) -> Result<(), StoreError>;

    /// Loads the record if its id is `id`.
    fn get(&self, id: &str) -> Result<AasRecord, StoreError> {
        resolve_id(self.load()?, id)
    }

    /// Replaces the submodel `name` on record `id` with a validated payload.
    ///
    /// Nothing is written unless the payload passes validation.
    fn put_submodel(
        &self,
        id: &str,
        name: &str,
        payload: Value,
    ) -> Result<SubmodelAck, StoreError> {
        let mut record = self.get(id)?;
        let submodel = Submodel::parse(name, payload)?;

        record.set_submodel(name, submodel.into_object());
        self.save(&record)?;

        tracing::info!("Updated submodel '{}' on AAS {}", name, id);

        Ok(SubmodelAck {
            ok: true,
            submodel: name.to_string(),
        })
    }
}

/// Matches a requested id against the stored record.
///
/// A mismatch means there is no record for that id.
pub fn resolve_id(record: AasRecord, requested: &str) -> Result<AasRecord, StoreError> {
    if record.id == requested {
        Ok(record)
    } else {
        Err(StoreError::NotFound(requested.to_string()))
    }
}

/// Document store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    asset_id: String,
}

impl JsonFileStore {
    /// Creates a store for `asset_id` under `data_dir`.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        asset_id: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let asset_id = asset_id.into();
        Self::validate_asset_id(&asset_id)?;

        Ok(Self {
            data_dir: data_dir.into(),
            asset_id,
        })
    }

    /// Validates an asset ID to prevent path traversal attacks.
    fn validate_asset_id(asset_id: &str) -> Result<(), StoreError> {
        if asset_id.is_empty()
            || asset_id.contains('/')
            || asset_id.contains('\\')
            || asset_id.contains("..")
            || asset_id.starts_with('.')
        {
            return Err(StoreError::InvalidAssetId(asset_id.to_string()));
        }
        Ok(())
    }

    /// Returns the full path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("aas_{}.json", self.asset_id))
    }

    fn seed(&self, path: &Path) -> Result<AasRecord, StoreError> {
        let record = AasRecord::default_for(&self.asset_id);
        self.save(&record)?;
        tracing::info!("Seeded default AAS record at {}", path.display());
        Ok(record)
    }
}

impl DocumentStore for JsonFileStore {
    fn asset_id(&self) -> &str {
        &self.asset_id
    }

    fn load(&self) -> Result<AasRecord, StoreError> {
        let path = self.path();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return self.seed(&path),
            Err(e) => return Err(StoreError::Io(path, e)),
        };

        match serde_json::from_slice::<AasRecord>(&bytes) {
            Ok(record) => Ok(record),
            Err(e) => {
                tracing::warn!(
                    "Corrupt AAS record at {} ({}), regenerating default",
                    path.display(),
                    e
                );
                self.seed(&path)
            }
        }
    }

    fn save(&self, record: &AasRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StoreError::Io(self.data_dir.clone(), e))?;

        let path = self.path();
        let bytes = serde_json::to_vec_pretty(record)?;

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("json.tmp");

        let mut file =
            File::create(&temp_path).map_err(|e| StoreError::Io(temp_path.clone(), e))?;

        file.write_all(&bytes)
            .map_err(|e| StoreError::Io(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| StoreError::Io(temp_path.clone(), e))?;

        fs::rename(&temp_path, &path).map_err(|e| StoreError::Io(path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DEFAULT_ASSET_ID;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path(), DEFAULT_ASSET_ID).unwrap();
        (store, temp_dir)
    }

    fn on_disk(store: &JsonFileStore) -> Value {
        serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap()
    }

    #[test]
    fn test_validate_asset_id() {
        // Valid
        assert!(JsonFileStore::validate_asset_id("1").is_ok());
        assert!(JsonFileStore::validate_asset_id("pump-7").is_ok());

        // Invalid
        assert!(JsonFileStore::validate_asset_id("").is_err());
        assert!(JsonFileStore::validate_asset_id("../evil").is_err());
        assert!(JsonFileStore::validate_asset_id("foo/bar").is_err());
        assert!(JsonFileStore::validate_asset_id("foo\\bar").is_err());
        assert!(JsonFileStore::validate_asset_id(".hidden").is_err());
    }

    #[test]
    fn test_path_layout() {
        let (store, temp) = setup();
        assert_eq!(store.path(), temp.path().join("aas_1.json"));
    }

    #[test]
    fn test_load_missing_file_seeds_default() {
        let (store, _temp) = setup();
        assert!(!store.path().exists());

        let record = store.load().unwrap();

        assert_eq!(record, AasRecord::default_for("1"));
        assert!(store.path().exists());
        assert_eq!(on_disk(&store), serde_json::to_value(&record).unwrap());
    }

    #[test]
    fn test_load_unreadable_path_is_error() {
        let (store, _temp) = setup();
        fs::create_dir(store.path()).unwrap();

        assert!(matches!(store.load(), Err(StoreError::Io(..))));
        // Not reseeded over the unreadable path
        assert!(store.path().is_dir());
    }

    #[test]
    fn test_asset_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path(), "pump-7").unwrap();

        assert_eq!(store.asset_id(), "pump-7");
        assert_eq!(store.load().unwrap().id, "pump-7");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("a").join("b"), "1").unwrap();

        store.save(&AasRecord::new("1")).unwrap();

        assert!(temp_dir.path().join("a").join("b").join("aas_1.json").exists());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (store, _temp) = setup();

        let record = AasRecord::default_for("1").with_submodel(
            "carbonFootprint",
            json!({ "kgCO2e": 12.5, "scopes": [1, 2], "verified": true })
                .as_object()
                .unwrap()
                .clone(),
        );
        store.save(&record).unwrap();

        assert_eq!(store.load().unwrap(), record);
    }

    #[test]
    fn test_save_is_pretty_and_ordered() {
        let (store, _temp) = setup();
        store.save(&AasRecord::default_for("1")).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("{\n  \"id\": \"1\""));
        let nameplate = text.find("\"nameplate\"").unwrap();
        let technical = text.find("\"technicalData\"").unwrap();
        assert!(nameplate < technical);
    }

    #[test]
    fn test_load_missing_id_recovers_default() {
        let (store, _temp) = setup();
        fs::write(store.path(), r#"{"submodels": {"nameplate": {}}}"#).unwrap();

        let record = store.load().unwrap();

        assert_eq!(record, AasRecord::default_for("1"));
        assert_eq!(on_disk(&store), serde_json::to_value(&record).unwrap());
    }

    #[test]
    fn test_load_invalid_json_recovers_default() {
        let (store, _temp) = setup();
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load().unwrap(), AasRecord::default_for("1"));
    }

    #[test]
    fn test_load_missing_submodels_normalizes_to_empty() {
        let (store, _temp) = setup();
        fs::write(store.path(), r#"{"id": "1"}"#).unwrap();

        let record = store.load().unwrap();
        assert_eq!(record.id, "1");
        assert!(record.submodels.is_empty());
    }

    #[test]
    fn test_get_wrong_id_not_found() {
        let (store, _temp) = setup();

        assert!(store.get("1").is_ok());
        assert!(matches!(store.get("2"), Err(StoreError::NotFound(id)) if id == "2"));
    }

    #[test]
    fn test_put_nameplate_replaces() {
        let (store, _temp) = setup();

        let ack = store
            .put_submodel(
                "1",
                "nameplate",
                json!({ "manufacturer": "ACME", "model": "X-1", "serialNumber": "SN-9" }),
            )
            .unwrap();

        assert_eq!(
            ack,
            SubmodelAck {
                ok: true,
                submodel: "nameplate".to_string()
            }
        );
        assert_eq!(
            Value::Object(store.load().unwrap().submodel("nameplate").unwrap().clone()),
            json!({ "manufacturer": "ACME", "model": "X-1", "serialNumber": "SN-9" })
        );
    }

    #[test]
    fn test_put_invalid_nameplate_leaves_record_unchanged() {
        let (store, _temp) = setup();
        let before = store.load().unwrap();

        let result = store.put_submodel(
            "1",
            "nameplate",
            json!({ "manufacturer": "", "model": "X", "serialNumber": "Y" }),
        );

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn test_put_technical_data_normalizes_units() {
        let (store, _temp) = setup();

        store
            .put_submodel(
                "1",
                "technicalData",
                json!({ "power": "500 Watts", "weight": "12KG" }),
            )
            .unwrap();

        assert_eq!(
            on_disk(&store)["submodels"]["technicalData"],
            json!({ "power": "500 W", "weight": "12kg" })
        );
    }

    #[test]
    fn test_put_custom_submodel_verbatim() {
        let (store, _temp) = setup();

        store
            .put_submodel("1", "customSubmodel", json!({ "foo": "bar" }))
            .unwrap();

        let record = store.load().unwrap();
        assert_eq!(record.submodels["customSubmodel"], json!({ "foo": "bar" }));
        // Recognized submodels are untouched
        assert!(record.submodel("nameplate").is_some());
    }

    #[test]
    fn test_put_custom_submodel_rejects_non_object() {
        let (store, _temp) = setup();

        let result = store.put_submodel("1", "customSubmodel", json!("text"));
        assert!(matches!(result, Err(StoreError::BadRequest(_))));
    }

    #[test]
    fn test_put_wrong_id_not_found() {
        let (store, _temp) = setup();

        let result = store.put_submodel("2", "customSubmodel", json!({ "foo": "bar" }));

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(store.load().unwrap().submodel("customSubmodel").is_none());
    }

    #[test]
    fn test_put_overwrites_whole_submodel() {
        let (store, _temp) = setup();

        store
            .put_submodel("1", "custom", json!({ "a": 1, "b": 2 }))
            .unwrap();
        store.put_submodel("1", "custom", json!({ "c": 3 })).unwrap();

        assert_eq!(
            store.load().unwrap().submodels["custom"],
            json!({ "c": 3 })
        );
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (store, temp) = setup();
        store.save(&AasRecord::default_for("1")).unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("aas_1.json")]);
    }
}
