//! Configuration file support for streamline-rbac
//!
//! ## Priority Order
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values
//!
//! ## Example Configuration
//!
//! ```toml
//! # streamline-rbac.toml
//!
//! [mds]
//! server_url = "https://mds.example.com:8090"
//! user = "mds-admin"
//! password = "mds-admin-secret"
//!
//! [clusters]
//! kafka = "4nKz8hC0QqyYd0lUCj5mnQ"
//! connect = "connect-cluster"
//! schema_registry = "schema-registry"
//!
//! [http]
//! timeout_ms = 30000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults::{DEFAULT_CONFIG_FILE, SYSTEM_CONFIG_FILE};
use super::HttpConfig;
use crate::error::{RbacError, Result};
use crate::scope::ClusterIds;

/// Root configuration structure for TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Metadata Service connection
    pub mds: MdsSection,

    /// Cluster ids role bindings are scoped to
    pub clusters: ClusterIds,

    /// HTTP client settings
    pub http: HttpConfig,
}

/// MDS section configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdsSection {
    /// MDS base URL
    pub server_url: Option<String>,

    /// User for HTTP Basic authentication
    pub user: Option<String>,

    /// Password for HTTP Basic authentication
    pub password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            RbacError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Load from the first default location that exists
    pub fn load_default() -> Option<Self> {
        let default_paths = [
            PathBuf::from(DEFAULT_CONFIG_FILE),
            PathBuf::from(SYSTEM_CONFIG_FILE),
            dirs::config_dir()
                .map(|p| p.join("streamline").join(DEFAULT_CONFIG_FILE))
                .unwrap_or_default(),
        ];

        for path in default_paths.iter().filter(|p| !p.as_os_str().is_empty()) {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {:?}", path);
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        None
    }

    /// Generate an example configuration file
    pub fn generate_example() -> String {
        r#"# streamline-rbac Configuration File
# Copy to streamline-rbac.toml and customize as needed
#
# Configuration priority (highest to lowest):
# 1. Command-line arguments
# 2. Environment variables (STREAMLINE_RBAC_*)
# 3. This configuration file
# 4. Default values

[mds]
# Metadata Service base URL
server_url = "http://localhost:8090"

# Credentials used for HTTP Basic authentication on every call
# user = "mds-admin"
# password = "mds-admin-secret"

# Log level (trace, debug, info, warn, error)
log_level = "info"

[clusters]
# Kafka cluster id (required for every binding)
kafka = "kafka-cluster-id"

# Optional sub-cluster ids
# connect = "connect-cluster"
# schema_registry = "schema-registry"
# ksql = "ksql-cluster"

[http]
# Unset means calls wait for MDS indefinitely
# timeout_ms = 30000
# connect_timeout_ms = 5000
"#
        .to_string()
    }
}
