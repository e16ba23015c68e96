//! NEX Configuration Management
//!
//! Handles configuration from environment variables and TOML files, and
//! validates the raw service settings into an immutable [`NexConfig`].
//!
//! Validation is asymmetric: an out-of-range minimum confidence degrades to
//! its default with a warning, while an out-of-range minimum spot length is
//! rejected.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;
use url::Url;

/// Default annotation service endpoint
pub const DEFAULT_NEX_URL: &str = "https://api.dandelion.eu/datatxt/nex/v1";

/// Default minimum confidence for returned annotations
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.6;

/// Default minimum spot length
pub const DEFAULT_MIN_LENGTH: i64 = 2;

const MAX_MIN_LENGTH: i64 = i32::MAX as i64;

/// Countries the service accepts for phone and VAT extraction
pub const ACCEPTED_COUNTRIES: &[&str] = &[
    "AD", "AE", "AM", "AO", "AQ", "AR", "AU", "BB", "BR", "BS", "BY", "CA", "CH", "CL", "CN", "CX",
    "DE", "FR", "GB", "HU", "IT", "JP", "KR", "MX", "NZ", "PG", "PL", "RE", "SE", "SG", "US", "YT",
    "ZW",
];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Annotation service settings (unvalidated)
    pub service: ServiceSettings,

    /// Output convention selection
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError { path, message },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    /// Apply overrides from a key lookup (environment, or a map in tests)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("NEX_URL") {
            self.service.url = url;
        }
        if let Some(id) = lookup("NEX_APP_ID") {
            self.service.app_id = Some(id);
        }
        if let Some(key) = lookup("NEX_APP_KEY") {
            self.service.app_key = Some(key);
        }

        // Unparseable numbers fall back to the default; range checks happen at build time
        if let Some(value) = lookup("NEX_MIN_CONFIDENCE") {
            self.service.min_confidence = match value.trim().parse::<f32>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(
                        key = "NEX_MIN_CONFIDENCE",
                        value = %value,
                        default = DEFAULT_MIN_CONFIDENCE,
                        "Unable to parse float setting, using default"
                    );
                    None
                }
            };
        }
        if let Some(value) = lookup("NEX_MIN_LENGTH") {
            self.service.min_length = match value.trim().parse::<i64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(
                        key = "NEX_MIN_LENGTH",
                        value = %value,
                        default = DEFAULT_MIN_LENGTH,
                        "Unable to parse integer setting, using default"
                    );
                    None
                }
            };
        }

        if let Some(types) = lookup("NEX_EXTRA_TYPES") {
            self.service.extra_types = types
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(country) = lookup("NEX_COUNTRY") {
            self.service.country = Some(country);
        }
        if let Some(spots) = lookup("NEX_CUSTOM_SPOTS") {
            self.service.custom_spots = Some(spots);
        }

        if let Some(convention) = lookup("NEX_OUTPUT_CONVENTION") {
            self.output.convention = convention.parse()?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Apply overrides from an explicit key/value map
    pub fn apply_map(&mut self, values: &HashMap<String, String>) -> Result<(), ConfigError> {
        self.apply_env(|key| values.get(key).cloned())
    }

    /// Validate the service settings into a client configuration
    pub fn nex_config(&self) -> Result<NexConfig, ConfigError> {
        self.service.to_config()
    }
}

/// Raw annotation service settings, as read from file or environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Endpoint URL of the NEX service
    pub url: String,

    /// Registered application identifier
    pub app_id: Option<String>,

    /// Application secret
    pub app_key: Option<String>,

    /// Minimum annotation confidence, in [0, 1]
    pub min_confidence: Option<f32>,

    /// Minimum spot length, >= 0
    pub min_length: Option<i64>,

    /// Extra entity types to recognize ("phone", "vat")
    pub extra_types: Vec<String>,

    /// Country assumed for phone and VAT matching
    pub country: Option<String>,

    /// Custom spot collection identifier
    pub custom_spots: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_NEX_URL.to_string(),
            app_id: None,
            app_key: None,
            min_confidence: None,
            min_length: None,
            extra_types: Vec::new(),
            country: None,
            custom_spots: None,
        }
    }
}

impl ServiceSettings {
    /// Validate into an immutable client configuration
    pub fn to_config(&self) -> Result<NexConfig, ConfigError> {
        let extra_types = self
            .extra_types
            .iter()
            .map(|s| s.parse::<ExtraType>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = NexConfig::builder(&self.url).extra_types(extra_types);
        if let Some(id) = &self.app_id {
            builder = builder.app_id(id);
        }
        if let Some(key) = &self.app_key {
            builder = builder.app_key(key);
        }
        if let Some(confidence) = self.min_confidence {
            builder = builder.min_confidence(confidence);
        }
        if let Some(length) = self.min_length {
            builder = builder.min_length(length);
        }
        if let Some(country) = &self.country {
            builder = builder.country(country);
        }
        if let Some(spots) = &self.custom_spots {
            builder = builder.custom_spots(spots);
        }

        builder.build()
    }
}

/// Extra entity types the service can match besides linked entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraType {
    Phone,
    Vat,
}

impl ExtraType {
    /// Get the request parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Vat => "vat",
        }
    }
}

impl std::fmt::Display for ExtraType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExtraType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phone" => Ok(Self::Phone),
            "vat" => Ok(Self::Vat),
            _ => Err(ConfigError::InvalidValue {
                key: "extra_types".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Output convention used to express annotations as RDF
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Flat enhancement structure (FISE)
    #[serde(alias = "fise")]
    Flat,
    /// Open-annotation style body/target/selector model (FAM)
    #[default]
    #[serde(alias = "fam")]
    Linked,
}

impl std::fmt::Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Linked => write!(f, "linked"),
        }
    }
}

impl std::str::FromStr for Convention {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "fise" => Ok(Self::Flat),
            "linked" | "fam" => Ok(Self::Linked),
            _ => Err(ConfigError::InvalidValue {
                key: "output.convention".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Convention chosen once for the lifetime of an engine
    pub convention: Convention,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

// ============================================================================
// Validated client configuration
// ============================================================================

/// Validated, immutable configuration of the annotation service client
#[derive(Clone, PartialEq)]
pub struct NexConfig {
    endpoint: Url,
    app_id: String,
    app_key: String,
    min_confidence: f32,
    min_length: u32,
    extra_types: Vec<ExtraType>,
    country: Option<String>,
    custom_spots: Option<String>,
}

impl NexConfig {
    /// Start building a configuration for the given endpoint
    pub fn builder(endpoint: impl Into<String>) -> NexConfigBuilder {
        NexConfigBuilder {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    pub fn min_length(&self) -> u32 {
        self.min_length
    }

    pub fn extra_types(&self) -> &[ExtraType] {
        &self.extra_types
    }

    /// Extra types as a comma-separated request value, if any were requested
    pub fn extra_types_param(&self) -> Option<String> {
        if self.extra_types.is_empty() {
            return None;
        }
        let values: Vec<&str> = self.extra_types.iter().map(|t| t.as_str()).collect();
        Some(values.join(","))
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn custom_spots(&self) -> Option<&str> {
        self.custom_spots.as_deref()
    }
}

impl std::fmt::Debug for NexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NexConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("min_confidence", &self.min_confidence)
            .field("min_length", &self.min_length)
            .field("extra_types", &self.extra_types)
            .field("country", &self.country)
            .field("custom_spots", &self.custom_spots)
            .finish()
    }
}

impl std::fmt::Display for NexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "endpoint       = {}", self.endpoint)?;
        writeln!(f, "app_id         = {}", self.app_id)?;
        writeln!(f, "app_key        = <redacted>")?;
        writeln!(f, "min_confidence = {}", self.min_confidence)?;
        writeln!(f, "min_length     = {}", self.min_length)?;
        writeln!(
            f,
            "extra_types    = {}",
            self.extra_types_param().unwrap_or_default()
        )?;
        writeln!(f, "country        = {}", self.country().unwrap_or(""))?;
        write!(f, "custom_spots   = {}", self.custom_spots().unwrap_or(""))
    }
}

/// Builder for [`NexConfig`]; all validation happens in [`NexConfigBuilder::build`]
#[derive(Debug, Clone, Default)]
pub struct NexConfigBuilder {
    endpoint: String,
    app_id: Option<String>,
    app_key: Option<String>,
    min_confidence: Option<f32>,
    min_length: Option<i64>,
    extra_types: Vec<ExtraType>,
    country: Option<String>,
    custom_spots: Option<String>,
}

impl NexConfigBuilder {
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    pub fn min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    pub fn min_length(mut self, min_length: i64) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn extra_types(mut self, extra_types: impl IntoIterator<Item = ExtraType>) -> Self {
        self.extra_types = extra_types.into_iter().collect();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn custom_spots(mut self, custom_spots: impl Into<String>) -> Self {
        self.custom_spots = Some(custom_spots.into());
        self
    }

    /// Validate and freeze the configuration
    pub fn build(self) -> Result<NexConfig, ConfigError> {
        let endpoint =
            Url::parse(self.endpoint.trim()).map_err(|e| ConfigError::InvalidUrl {
                url: self.endpoint.clone(),
                message: e.to_string(),
            })?;

        let app_id = self
            .app_id
            .ok_or_else(|| ConfigError::MissingRequired("app_id".to_string()))?;
        let app_key = self
            .app_key
            .ok_or_else(|| ConfigError::MissingRequired("app_key".to_string()))?;

        let min_confidence = match self.min_confidence {
            Some(value) if (0.0..=1.0).contains(&value) => value,
            Some(value) => {
                warn!(
                    key = "min_confidence",
                    value,
                    default = DEFAULT_MIN_CONFIDENCE,
                    "Configured value must be in [0..1], using default"
                );
                DEFAULT_MIN_CONFIDENCE
            }
            None => DEFAULT_MIN_CONFIDENCE,
        };

        let min_length = self.min_length.unwrap_or(DEFAULT_MIN_LENGTH);
        if !(0..=MAX_MIN_LENGTH).contains(&min_length) {
            return Err(ConfigError::OutOfRange {
                key: "min_length".to_string(),
                value: min_length,
                min: 0,
                max: MAX_MIN_LENGTH,
            });
        }

        let mut extra_types = Vec::with_capacity(self.extra_types.len());
        for extra in self.extra_types {
            if !extra_types.contains(&extra) {
                extra_types.push(extra);
            }
        }

        let country = self
            .country
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty());

        if !extra_types.is_empty() {
            if let Some(country) = &country {
                if !ACCEPTED_COUNTRIES.contains(&country.as_str()) {
                    return Err(ConfigError::UnsupportedCountry {
                        country: country.clone(),
                    });
                }
            }
        }

        let custom_spots = self
            .custom_spots
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(NexConfig {
            endpoint,
            app_id,
            app_key,
            min_confidence,
            min_length: min_length as u32,
            extra_types,
            country,
            custom_spots,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Value {value} for {key} falls outside of [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error(
        "Country {country} is not supported for extra types (accepted: {})",
        ACCEPTED_COUNTRIES.join(", ")
    )]
    UnsupportedCountry { country: String },

    #[error("Invalid endpoint URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
