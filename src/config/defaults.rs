//! Default constants for streamline-rbac configuration

/// Default MDS base URL
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8090";

/// Path prefix of the MDS RBAC API
pub const API_PREFIX: &str = "/security/1.0";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Resource name carried by role-binding descriptors; the real target lives
/// in the descriptor's scope
pub const WILDCARD_RESOURCE_NAME: &str = "*";

/// Resource name of cluster-level role-binding descriptors
pub const CLUSTER_RESOURCE_NAME: &str = "cluster";

/// Pseudo-resource used to scope Control Center roles
pub const CONTROL_CENTER_RESOURCE_NAME: &str = "control-center";

/// Prefix MDS expects on connector resource names
pub const CONNECTOR_RESOURCE_PREFIX: &str = "Connector:";

/// Config file names searched by `ConfigFile::load_default`
pub const DEFAULT_CONFIG_FILE: &str = "streamline-rbac.toml";
pub const SYSTEM_CONFIG_FILE: &str = "/etc/streamline/rbac.toml";
