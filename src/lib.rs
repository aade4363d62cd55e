//! AAS + DPP demo service.
//!
//! Serves a single Asset Administration Shell record, its Digital Product
//! Passport projection, HTML views of both, and QR codes linking to them.

pub mod config;
pub mod qr;
pub mod server;

pub use config::{Config, ConfigError, ConfigSource, ConfigValue};
