//! Configuration module for schemagraph.
//!
//! Handles catalog credentials, inference tuning, and render settings.

mod connection;
mod settings;

pub use connection::{CatalogConfig, ConnectionError};
pub use settings::{
    expand_env_vars, CatalogSettings, InferenceSettings, LoggingSettings, RenderSettings,
    Settings, SettingsError,
};
