//! AAS + DPP Core Library
//!
//! Record model, single-file document store and the Digital Product
//! Passport projection shared by the server and the CLI.

pub mod dpp;
pub mod error;
pub mod record;
pub mod store;
pub mod submodel;

pub use dpp::{project, DppLinks, DppMeta, DppNameplate, DppRecord, DppTechnicalData, DPP_SCHEMA};
pub use error::StoreError;
pub use record::{AasRecord, JsonObject, DEFAULT_ASSET_ID};
pub use store::{resolve_id, DocumentStore, JsonFileStore, SubmodelAck};
pub use submodel::{
    normalize_power, normalize_weight, Nameplate, Submodel, TechnicalData, NAMEPLATE,
    TECHNICAL_DATA,
};
