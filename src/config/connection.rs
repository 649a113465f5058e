//! Catalog connection configuration.
//!
//! Credentials for a warehouse catalog are carried as an explicit value and
//! handed to a provider when it is constructed. Providers never consult the
//! process environment themselves; expansion of `${VAR}` references happens
//! once, while loading [`Settings`](super::Settings).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error type for catalog configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required catalog field: {0}")]
    MissingField(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Connection parameters for a warehouse catalog.
///
/// `Debug` redacts the credential.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Account identifier (e.g. `xy12345.eu-west-1`).
    pub account: String,
    /// Login name.
    pub user: String,
    /// Password or token.
    pub credential: String,
    /// Compute warehouse used for catalog queries.
    pub warehouse: String,
}

impl CatalogConfig {
    /// Create a new catalog config.
    pub fn new(
        account: impl Into<String>,
        user: impl Into<String>,
        credential: impl Into<String>,
        warehouse: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            user: user.into(),
            credential: credential.into(),
            warehouse: warehouse.into(),
        }
    }

    /// Check that every field required to open a session is present.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        let fields = [
            ("account", &self.account),
            ("user", &self.user),
            ("credential", &self.credential),
            ("warehouse", &self.warehouse),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConnectionError::MissingField(name));
            }
        }
        if self.account.contains(char::is_whitespace) {
            return Err(ConnectionError::InvalidConfig(format!(
                "account identifier contains whitespace: '{}'",
                self.account
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("account", &self.account)
            .field("user", &self.user)
            .field("credential", &"<redacted>")
            .field("warehouse", &self.warehouse)
            .finish()
    }
}
