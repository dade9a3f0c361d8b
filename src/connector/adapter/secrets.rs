use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::DomainError;

pub const API_KEY_ENV: &str = "THINKCHAT_API_KEY";
pub const SECRETS_FILE_NAME: &str = "secrets.json";

#[derive(Deserialize)]
struct SecretsFile {
    api_key: Option<String>,
}

/// Opaque bearer credential for the completion API.
///
/// The value is never validated beyond being non-empty, and never printed.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::configuration("API key is empty"));
        }
        Ok(Self(value))
    }

    /// Prefer `env_value` (read from `THINKCHAT_API_KEY`), falling back to the
    /// `api_key` field of a JSON secrets file.
    pub fn resolve(env_value: Option<String>, secrets_path: &Path) -> Result<Self, DomainError> {
        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            debug!("Using API key from {}", API_KEY_ENV);
            return Self::new(value);
        }

        if !secrets_path.exists() {
            return Err(DomainError::configuration(format!(
                "no API key: set {} or add \"api_key\" to {}",
                API_KEY_ENV,
                secrets_path.display()
            )));
        }

        let contents = std::fs::read_to_string(secrets_path)?;
        let secrets: SecretsFile = serde_json::from_str(&contents).map_err(|e| {
            DomainError::configuration(format!(
                "invalid secrets file {}: {}",
                secrets_path.display(),
                e
            ))
        })?;

        let value = secrets.api_key.ok_or_else(|| {
            DomainError::configuration(format!(
                "secrets file {} has no \"api_key\"",
                secrets_path.display()
            ))
        })?;
        debug!("Using API key from {}", secrets_path.display());
        Self::new(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}
