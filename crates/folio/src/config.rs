//! Folio configuration
//!
//! Read from an optional TOML file; every field has a default so an empty
//! file (or none at all) is a valid configuration. Front ends layer their
//! own overrides (CLI flags) on top before calling [`FolioConfig::validate`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_core::{DEFAULT_CLAIMS_KEY, DEFAULT_PROFILE_KEY};
use folio_remote::{RemoteConfig, DEFAULT_ISSUER_NAMESPACE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::DEFAULT_LOCAL_ONLY_TOKEN;

/// Default number of claims requested per issuer page.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Root URL of the claims API
    pub api_base_url: String,
    /// Namespace issuer URIs are built from
    pub issuer_namespace: String,
    /// Token value meaning "no backend access"
    pub local_only_token: String,
    /// Slot key of the local claims array
    pub claims_key: String,
    /// Slot key of the profile settings
    pub profile_key: String,
    /// Claims requested per issuer page
    pub page_limit: u32,
    /// SQLite database used for local slots by native front ends
    pub storage_path: PathBuf,
    /// Per-request timeout; unset means no timeout
    pub request_timeout_secs: Option<u64>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:9000".to_string(),
            issuer_namespace: DEFAULT_ISSUER_NAMESPACE.to_string(),
            local_only_token: DEFAULT_LOCAL_ONLY_TOKEN.to_string(),
            claims_key: DEFAULT_CLAIMS_KEY.to_string(),
            profile_key: DEFAULT_PROFILE_KEY.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            storage_path: PathBuf::from("folio.db"),
            request_timeout_secs: None,
        }
    }
}

impl FolioConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url must not be empty".into()));
        }
        if self.page_limit == 0 {
            return Err(Error::Config("page_limit must be at least 1".into()));
        }
        if self.claims_key.is_empty() || self.profile_key.is_empty() {
            return Err(Error::Config("slot keys must not be empty".into()));
        }
        if self.claims_key == self.profile_key {
            return Err(Error::Config(format!(
                "claims_key and profile_key are both '{}'",
                self.claims_key
            )));
        }
        Ok(())
    }

    /// Settings for the remote claims client.
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.api_base_url.clone(),
            issuer_namespace: self.issuer_namespace.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = FolioConfig::default();
        config.validate().unwrap();
        assert_eq!(config.claims_key, "folio.claims");
        assert_eq!(config.profile_key, "folio.profile");
        assert_eq!(config.remote_config().timeout, None);
    }

    #[test]
    fn test_partial_toml() {
        let config = FolioConfig::from_toml_str(
            r#"
            api_base_url = "https://claims.example.org"
            page_limit = 20
            request_timeout_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://claims.example.org");
        assert_eq!(config.page_limit, 20);
        assert_eq!(config.local_only_token, DEFAULT_LOCAL_ONLY_TOKEN);
        assert_eq!(
            config.remote_config().timeout,
            Some(Duration::from_secs(15))
        );
    }

    #[test]
    fn test_bad_toml() {
        let result = FolioConfig::from_toml_str("page_limit = \"many\"");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_validate_rejects() {
        let empty_url = FolioConfig {
            api_base_url: "  ".into(),
            ..Default::default()
        };
        assert!(empty_url.validate().is_err());

        let zero_limit = FolioConfig {
            page_limit: 0,
            ..Default::default()
        };
        assert!(zero_limit.validate().is_err());

        let shared_key = FolioConfig {
            profile_key: "folio.claims".into(),
            ..Default::default()
        };
        assert!(matches!(shared_key.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("folio.toml");
        assert_eq!(
            FolioConfig::load_or_default(&missing).unwrap(),
            FolioConfig::default()
        );

        std::fs::write(&missing, "claims_key = \"my.claims\"\n").unwrap();
        let loaded = FolioConfig::load_or_default(&missing).unwrap();
        assert_eq!(loaded.claims_key, "my.claims");
    }
}
