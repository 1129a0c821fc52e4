//! Configuration module for streamline-rbac
//!
//! - `defaults` - Default constants and values
//! - `file` - TOML configuration file

mod defaults;
pub mod file;

pub use defaults::*;
pub use file::ConfigFile;

use crate::error::{RbacError, Result};
use crate::scope::ClusterIds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP behaviour of the MDS client.
///
/// Both timeouts default to `None`: a call blocks until MDS answers or the
/// connection drops. Set them to bound every request. There is no retry
/// policy; a failed call is reported once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

/// Complete client configuration.
///
/// Built from a [`ConfigFile`] and then overridden by CLI arguments (which
/// also read `STREAMLINE_RBAC_*` environment variables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbacConfig {
    /// MDS base URL, e.g. `https://mds.example.com:8090`
    pub server_url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub cluster_ids: ClusterIds,
    pub http: HttpConfig,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            user: None,
            password: None,
            cluster_ids: ClusterIds::default(),
            http: HttpConfig::default(),
        }
    }
}

impl RbacConfig {
    /// Configuration taken from a parsed config file
    pub fn from_file(file: &ConfigFile) -> Self {
        Self {
            server_url: file
                .mds
                .server_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            user: file.mds.user.clone(),
            password: file.mds.password.clone(),
            cluster_ids: file.clusters.clone(),
            http: file.http.clone(),
        }
    }

    /// Check settings the client cannot work without
    pub fn validate(&self) -> Result<()> {
        let url = self.server_url.trim();
        if url.is_empty() {
            return Err(RbacError::config("server_url", "must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RbacError::config(
                "server_url",
                format!("'{}' must start with http:// or https://", url),
            ));
        }
        if self.user.is_some() != self.password.is_some() {
            return Err(RbacError::config(
                "user/password",
                "both or neither must be set",
            ));
        }
        if self.http.timeout_ms == Some(0) {
            return Err(RbacError::config("http.timeout_ms", "must be greater than 0"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.server_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RbacConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(config.http.timeout().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = RbacConfig {
            server_url: "mds:8090".to_string(),
            ..RbacConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RbacConfig {
            server_url: "  ".to_string(),
            ..RbacConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_user_and_password_together() {
        let config = RbacConfig {
            user: Some("admin".to_string()),
            ..RbacConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("user/password"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = RbacConfig {
            http: HttpConfig {
                timeout_ms: Some(0),
                connect_timeout_ms: None,
            },
            ..RbacConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = RbacConfig {
            server_url: "http://mds:8090/".to_string(),
            ..RbacConfig::default()
        };
        assert_eq!(config.base_url(), "http://mds:8090");
    }

    #[test]
    fn test_http_timeouts() {
        let http = HttpConfig {
            timeout_ms: Some(1500),
            connect_timeout_ms: Some(250),
        };
        assert_eq!(http.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(http.connect_timeout(), Some(Duration::from_millis(250)));
    }
}
