//! Store configuration
//!
//! Connection settings for the document store, read once at client
//! construction. The secret access key is wrapped in `Sensitive` so it
//! can never leak through Debug or Display formatting.

use docbind_core_types::Sensitive;

use crate::errors::Result;
use docbind_core::errors::DocBindError;

/// Region and credential configuration for the store client
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: Sensitive<String>,
}

impl StoreConfig {
    pub fn new(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: Sensitive::new(secret_access_key.into()),
        }
    }

    /// Read configuration from the environment
    ///
    /// Expects `DOCBIND_REGION`, `DOCBIND_ACCESS_KEY_ID`, and
    /// `DOCBIND_SECRET_ACCESS_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfigValue` naming the first absent variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            region: required_env("DOCBIND_REGION")?,
            access_key_id: required_env("DOCBIND_ACCESS_KEY_ID")?,
            secret_access_key: Sensitive::new(required_env("DOCBIND_SECRET_ACCESS_KEY")?),
        })
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DocBindError::MissingConfigValue {
            name: name.to_string(),
        })
}
