use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: ConfigValue<u16>,
    /// Directory holding the AAS record file
    pub data_dir: ConfigValue<PathBuf>,
    /// Public base URL used to build absolute links (no trailing slash)
    pub public_base_url: ConfigValue<String>,
    /// Shared secret required on write endpoints, if set
    #[serde(serialize_with = "mask_secret")]
    pub api_key: ConfigValue<Option<String>>,
    /// Id of the managed asset
    pub asset_id: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    public_base_url: Option<String>,
    api_key: Option<String>,
    asset_id: Option<String>,
}

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8000";

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut port = ConfigValue::new(DEFAULT_PORT, ConfigSource::Default);
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut public_base_url =
            ConfigValue::new(DEFAULT_PUBLIC_BASE_URL.to_string(), ConfigSource::Default);
        let mut api_key = ConfigValue::new(None, ConfigSource::Default);
        let mut asset_id = ConfigValue::new(
            aas_dpp_core::DEFAULT_ASSET_ID.to_string(),
            ConfigSource::Default,
        );
        let mut config_file = None;

        // Try to load from config file
        let path = config_path
            .or_else(|| std::env::var("AAS_DPP_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(p) = file_config.port {
                port = ConfigValue::new(p, ConfigSource::File);
            }
            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(url) = file_config.public_base_url {
                public_base_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(key) = file_config.api_key {
                api_key = ConfigValue::new(Some(key), ConfigSource::File);
            }
            if let Some(id) = file_config.asset_id {
                asset_id = ConfigValue::new(id, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(p) = std::env::var("AAS_DPP_PORT") {
            let parsed = p
                .parse()
                .map_err(|_| ConfigError::InvalidValue("AAS_DPP_PORT".to_string(), p))?;
            port = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("AAS_DPP_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("AAS_DPP_PUBLIC_BASE_URL") {
            public_base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(key) = std::env::var("AAS_DPP_API_KEY") {
            api_key = ConfigValue::new(Some(key), ConfigSource::Environment);
        }
        if let Ok(id) = std::env::var("AAS_DPP_ASSET_ID") {
            asset_id = ConfigValue::new(id, ConfigSource::Environment);
        }

        public_base_url.value = public_base_url.value.trim_end_matches('/').to_string();
        // An empty key means writes are open
        api_key.value = api_key.value.filter(|k| !k.is_empty());

        Ok(Self {
            port,
            data_dir,
            public_base_url,
            api_key,
            asset_id,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/aas-dpp/
    /// - macOS: ~/Library/Application Support/aas-dpp/
    /// - Windows: %APPDATA%/aas-dpp/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aas-dpp")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/aas-dpp/
    /// - macOS: ~/Library/Application Support/aas-dpp/
    /// - Windows: %APPDATA%/aas-dpp/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aas-dpp")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

fn mask_secret<S>(value: &ConfigValue<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let masked = value.value.as_ref().map(|_| "********");
    ConfigValue::new(masked, value.source.clone()).serialize(serializer)
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, value) => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
