//! TOML-based configuration for schemagraph.
//!
//! Supports a config file (schemagraph.toml) with environment variable
//! expansion in the catalog section.
//!
//! Example configuration:
//! ```toml
//! [catalog]
//! account = "${SNOWFLAKE_ACCOUNT}"
//! user = "${SNOWFLAKE_USER}"
//! credential = "${SNOWFLAKE_PASSWORD}"
//! warehouse = "COMPUTE_WH"
//! database = "ANALYTICS"
//!
//! [inference]
//! rules = ["suffix_strip", "substring_split", "exact_name"]
//! key_markers = ["_ID", "_num", "_number"]
//! dimension_suffix = "_dim"
//! fact_suffix = "_fact"
//!
//! [render]
//! output_dir = "uploads"
//! format = "png"
//! show_columns = false
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::CatalogConfig;
use crate::inference::{rule_by_name, InferenceConfig};
use crate::render::OutputFormat;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unknown inference rule: {0}")]
    UnknownRule(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Warehouse catalog connection.
    pub catalog: CatalogSettings,

    /// Relationship inference tuning.
    pub inference: InferenceSettings,

    /// Graph rendering.
    pub render: RenderSettings,

    /// Log output.
    pub logging: LoggingSettings,
}

/// Catalog connection settings.
///
/// Library callers hand these to
/// [`InformationSchemaProvider::from_settings`](crate::metadata::InformationSchemaProvider::from_settings)
/// together with their own [`CatalogClient`](crate::metadata::CatalogClient).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Account identifier (supports ${ENV_VAR} expansion).
    pub account: String,

    /// Login name (supports ${ENV_VAR} expansion).
    pub user: String,

    /// Password or token (supports ${ENV_VAR} expansion).
    pub credential: String,

    /// Warehouse (supports ${ENV_VAR} expansion).
    pub warehouse: String,

    /// Database whose information schema is read.
    pub database: Option<String>,
}

impl CatalogSettings {
    /// Build a [`CatalogConfig`] with environment variables expanded.
    pub fn resolved_config(&self) -> Result<CatalogConfig, SettingsError> {
        Ok(CatalogConfig::new(
            expand_env_vars(&self.account)?,
            expand_env_vars(&self.user)?,
            expand_env_vars(&self.credential)?,
            expand_env_vars(&self.warehouse)?,
        ))
    }
}

/// Inference settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceSettings {
    /// Enabled heuristic rules, in priority order.
    pub rules: Vec<String>,

    /// Column markers that indicate a key (suffix or embedded).
    pub key_markers: Vec<String>,

    /// Suffix naming dimension tables.
    pub dimension_suffix: String,

    /// Suffix naming fact tables.
    pub fact_suffix: String,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        let defaults = InferenceConfig::default();
        Self {
            rules: defaults.rules.iter().map(|r| r.name.to_string()).collect(),
            key_markers: defaults.key_markers,
            dimension_suffix: defaults.dimension_suffix,
            fact_suffix: defaults.fact_suffix,
        }
    }
}

impl InferenceSettings {
    /// Convert to an engine configuration, resolving rule names.
    pub fn to_inference_config(&self) -> Result<InferenceConfig, SettingsError> {
        let rules = self
            .rules
            .iter()
            .map(|name| rule_by_name(name).ok_or_else(|| SettingsError::UnknownRule(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        if self.key_markers.iter().any(|m| m.is_empty()) {
            return Err(SettingsError::InvalidConfig(
                "key_markers must not contain empty strings".to_string(),
            ));
        }
        if self.dimension_suffix.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "dimension_suffix must not be empty".to_string(),
            ));
        }

        Ok(InferenceConfig {
            rules,
            key_markers: self.key_markers.clone(),
            dimension_suffix: self.dimension_suffix.clone(),
            fact_suffix: self.fact_suffix.clone(),
        })
    }
}

/// Render settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Directory rendered artifacts are written to.
    pub output_dir: PathBuf,

    /// Output format (png, svg, pdf, dot).
    pub format: String,

    /// Include a column summary in each table node.
    pub show_columns: bool,

    /// Graphviz executable.
    pub dot_binary: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("uploads"),
            format: "png".to_string(),
            show_columns: false,
            dot_binary: "dot".to_string(),
        }
    }
}

impl RenderSettings {
    /// Get the output format.
    pub fn output_format(&self) -> Result<OutputFormat, SettingsError> {
        self.format
            .parse()
            .map_err(|_| SettingsError::UnsupportedFormat(self.format.clone()))
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SCHEMAGRAPH_CONFIG`
    /// 2. `./schemagraph.toml`
    /// 3. `~/.config/schemagraph/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SCHEMAGRAPH_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("schemagraph.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("schemagraph").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    var_name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if var_name.is_empty() {
                // A lone $ is kept literally
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
