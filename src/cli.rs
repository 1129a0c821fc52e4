//! streamline-rbac - Command-line interface for MDS role bindings
//!
//! Creates and removes role bindings and runs reverse lookups against a
//! Confluent Metadata Service.

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use streamline_rbac::config::DEFAULT_LOG_LEVEL;
use streamline_rbac::scope::{ClusterIds, ClusterKind, PatternType, ResourceType};
use streamline_rbac::{ConfigFile, MdsClient, RbacConfig, Result};
use tracing::debug;

mod cli_errors;
mod cli_format;

use crate::cli_errors::print_error_hint;
use crate::cli_format::{print_json, print_list, print_success, OutputFormat};

/// streamline-rbac CLI
#[derive(Parser, Debug)]
#[command(name = "streamline-rbac")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Jose David Baena")]
#[command(about = "Manage role bindings through the Confluent Metadata Service")]
#[command(long_about = r#"Manage role bindings through the Confluent Metadata Service

QUICK START:
    # Check that the credentials are accepted
    streamline-rbac --user mds-admin --password secret authenticate

    # Grant DeveloperRead on the topic "orders"
    streamline-rbac --kafka-cluster-id kafka-1 \
        bind --principal User:alice --role DeveloperRead --resource orders

    # Grant SystemAdmin on the whole Connect cluster
    streamline-rbac --kafka-cluster-id kafka-1 --connect-cluster-id connect-1 \
        bind-cluster --principal Group:ops --role SystemAdmin --connect

    # Who holds DeveloperRead on the Kafka cluster?
    streamline-rbac lookup principals --role DeveloperRead

ENVIRONMENT VARIABLES:
    STREAMLINE_RBAC_CONFIG       Configuration file
    STREAMLINE_RBAC_SERVER_URL   MDS base URL
    STREAMLINE_RBAC_USER         MDS user
    STREAMLINE_RBAC_PASSWORD     MDS password
    RUST_LOG                     Log filter (overrides --log-level)
    NO_COLOR                     Disable colored output"#)]
struct Cli {
    /// Configuration file (default: streamline-rbac.toml, then system and user config dirs)
    #[arg(long, short = 'c', global = true, env = "STREAMLINE_RBAC_CONFIG")]
    config: Option<PathBuf>,

    /// MDS base URL
    #[arg(long, global = true, env = "STREAMLINE_RBAC_SERVER_URL")]
    server_url: Option<String>,

    /// User for HTTP Basic authentication
    #[arg(long, short = 'u', global = true, env = "STREAMLINE_RBAC_USER")]
    user: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(long, global = true, env = "STREAMLINE_RBAC_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Kafka cluster id
    #[arg(long, global = true, env = "STREAMLINE_RBAC_KAFKA_CLUSTER_ID")]
    kafka_cluster_id: Option<String>,

    /// Kafka Connect cluster id
    #[arg(long, global = true, env = "STREAMLINE_RBAC_CONNECT_CLUSTER_ID")]
    connect_cluster_id: Option<String>,

    /// Schema Registry cluster id
    #[arg(long, global = true, env = "STREAMLINE_RBAC_SCHEMA_REGISTRY_CLUSTER_ID")]
    schema_registry_cluster_id: Option<String>,

    /// ksqlDB cluster id
    #[arg(long, global = true, env = "STREAMLINE_RBAC_KSQL_CLUSTER_ID")]
    ksql_cluster_id: Option<String>,

    /// Request timeout in milliseconds (default: wait indefinitely)
    #[arg(long, global = true, env = "STREAMLINE_RBAC_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "STREAMLINE_RBAC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exchange the configured credentials for a token
    Authenticate,

    /// Grant a role on a single resource of the Kafka cluster
    #[command(long_about = r#"Grant a role on a single resource of the Kafka cluster

EXAMPLES:
    # Read access to one topic
    streamline-rbac bind --principal User:alice --role DeveloperRead --resource orders

    # Ownership of every consumer group starting with "etl-"
    streamline-rbac bind --principal Group:etl --role ResourceOwner \
        --resource-type Group --resource etl- --pattern prefixed"#)]
    Bind {
        #[arg(long)]
        principal: String,

        #[arg(long)]
        role: String,

        /// Resource name
        #[arg(long)]
        resource: String,

        /// Resource type (Topic, Group, Cluster, TransactionalId, Subject, Connector, ...)
        #[arg(long, default_value = "Topic")]
        resource_type: String,

        /// Pattern type (literal, prefixed)
        #[arg(long, default_value = "literal")]
        pattern: PatternType,
    },

    /// Grant a role on a whole cluster, a connector, a subject or Control Center
    BindCluster {
        #[arg(long)]
        principal: String,

        #[arg(long)]
        role: String,

        #[command(flatten)]
        target: ClusterTarget,

        /// Connect cluster id to use instead of the configured one (with --connect)
        #[arg(long)]
        connect_override: Option<String>,
    },

    /// Remove a role from a principal at a cluster scope
    Unbind {
        #[arg(long)]
        principal: String,

        #[arg(long)]
        role: String,

        /// Cluster scope (kafka, connect, schema-registry, ksql)
        #[arg(long, default_value = "kafka")]
        scope: ClusterKind,
    },

    /// Reverse lookups
    Lookup {
        #[command(subcommand)]
        query: LookupCommands,
    },

    /// List every role name known to MDS
    Roles,

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Exactly one cluster-level target
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ClusterTarget {
    /// The Kafka cluster
    #[arg(long)]
    kafka: bool,

    /// The Kafka Connect cluster
    #[arg(long)]
    connect: bool,

    /// The Schema Registry cluster
    #[arg(long)]
    schema_registry: bool,

    /// A Schema Registry subject
    #[arg(long)]
    subject: Option<String>,

    /// A Kafka Connect connector
    #[arg(long)]
    connector: Option<String>,

    /// Control Center
    #[arg(long)]
    control_center: bool,

    /// The ksqlDB cluster
    #[arg(long)]
    ksql: bool,
}

#[derive(Subcommand, Debug)]
enum LookupCommands {
    /// Principals holding a role
    Principals {
        #[arg(long)]
        role: String,

        #[arg(long, default_value = "kafka")]
        scope: ClusterKind,
    },

    /// Roles bound to a principal
    Roles {
        #[arg(long)]
        principal: String,

        #[arg(long, default_value = "kafka")]
        scope: ClusterKind,
    },

    /// Resources a principal holds a role on
    Resources {
        #[arg(long)]
        principal: String,

        #[arg(long)]
        role: String,

        #[arg(long, default_value = "kafka")]
        scope: ClusterKind,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print an example configuration file
    Example,
    /// Print the resolved configuration (password hidden)
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let file = match load_config_file(&cli) {
        Ok(file) => file,
        Err(e) => {
            print_error_hint(&e);
            return ExitCode::from(1);
        }
    };

    init_tracing(&cli, &file);

    if let Err(e) = run(cli, &file) {
        print_error_hint(&e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn load_config_file(cli: &Cli) -> Result<ConfigFile> {
    match &cli.config {
        Some(path) => ConfigFile::load(path),
        None => Ok(ConfigFile::load_default().unwrap_or_default()),
    }
}

fn init_tracing(cli: &Cli, file: &ConfigFile) {
    let level = cli
        .log_level
        .clone()
        .or_else(|| file.mds.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// File values overridden by flags and environment variables
fn resolve_config(cli: &Cli, file: &ConfigFile) -> RbacConfig {
    let mut config = RbacConfig::from_file(file);

    if let Some(ref url) = cli.server_url {
        config.server_url = url.clone();
    }
    if cli.user.is_some() {
        config.user = cli.user.clone();
    }
    if cli.password.is_some() {
        config.password = cli.password.clone();
    }
    if cli.timeout_ms.is_some() {
        config.http.timeout_ms = cli.timeout_ms;
    }

    let ids = &mut config.cluster_ids;
    override_id(&mut ids.kafka, &cli.kafka_cluster_id);
    override_id(&mut ids.connect, &cli.connect_cluster_id);
    override_id(&mut ids.schema_registry, &cli.schema_registry_cluster_id);
    override_id(&mut ids.ksql, &cli.ksql_cluster_id);

    config
}

fn override_id(slot: &mut Option<String>, flag: &Option<String>) {
    if flag.is_some() {
        *slot = flag.clone();
    }
}

fn run(cli: Cli, file: &ConfigFile) -> Result<()> {
    let config = resolve_config(&cli, file);
    let format = cli.format;
    debug!(server_url = %config.server_url, cluster_ids = ?config.cluster_ids, "configuration resolved");

    if let Commands::Config { action } = &cli.command {
        return run_config(action, &config);
    }

    let client = MdsClient::new(&config)?;

    match cli.command {
        Commands::Authenticate => {
            let token = client.authenticate()?;
            match format {
                OutputFormat::Json => print_json(&json!({
                    "token_type": token.kind,
                    "expires_in": token.expires_in_secs,
                    "expires_at": token.expires_at().to_rfc3339(),
                }))?,
                OutputFormat::Text => print_success(&format!(
                    "Authenticated ({} token, expires {})",
                    token.kind,
                    token.expires_at().to_rfc3339()
                )),
            }
        }
        Commands::Bind {
            principal,
            role,
            resource,
            resource_type,
            pattern,
        } => {
            let binding = streamline_rbac::RoleBinding::for_resource(
                &principal,
                &role,
                client.cluster_ids(),
                ResourceType::parse(&resource_type),
                &resource,
                pattern,
            )?;
            client.bind_request(&binding)?;
            report_binding(format, "Granted", &binding)?;
        }
        Commands::BindCluster {
            principal,
            role,
            target,
            connect_override,
        } => {
            target.check_connect_override(connect_override.as_deref())?;
            let builder = client.bind(&principal, &role);
            let builder = if target.kafka {
                builder.for_kafka()?
            } else if target.connect {
                builder.for_kafka_connect_with(connect_override.as_deref())?
            } else if target.schema_registry {
                builder.for_schema_registry()?
            } else if let Some(ref subject) = target.subject {
                builder.for_schema_subject(subject)?
            } else if let Some(ref connector) = target.connector {
                builder.for_connector(connector)?
            } else if target.control_center {
                builder.for_control_center()?
            } else {
                builder.for_ksql()?
            };
            let binding = builder.apply()?;
            client.bind_request(&binding)?;
            report_binding(format, "Granted", &binding)?;
        }
        Commands::Unbind {
            principal,
            role,
            scope,
        } => {
            let clusters = client.cluster_ids().scope_for(scope)?;
            let scope = streamline_rbac::RequestScope::clusters_only(clusters);
            client.delete_role(&principal, &role, &scope)?;
            match format {
                OutputFormat::Json => print_json(&json!({
                    "principal": principal,
                    "role": role,
                    "scope": scope.clusters(),
                    "deleted": true,
                }))?,
                OutputFormat::Text => {
                    print_success(&format!("Removed {} from {}", role, principal))
                }
            }
        }
        Commands::Lookup { query } => run_lookup(&client, query, format)?,
        Commands::Roles => {
            let names = client.role_names();
            print_list(format, "Roles", &names)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

impl ClusterTarget {
    /// `--connect-override` only narrows a Connect binding. `--connect` is a
    /// plain switch, which clap's `requires` treats as always present.
    fn check_connect_override(&self, connect_override: Option<&str>) -> Result<()> {
        if connect_override.is_some() && !self.connect {
            return Err(streamline_rbac::RbacError::config(
                "--connect-override",
                "only applies together with --connect",
            ));
        }
        Ok(())
    }
}

fn run_lookup(client: &MdsClient, query: LookupCommands, format: OutputFormat) -> Result<()> {
    let ids: &ClusterIds = client.cluster_ids();
    match query {
        LookupCommands::Principals { role, scope } => {
            let clusters = ids.scope_for(scope)?;
            let principals = client.lookup_principals_by_role_in(&role, &clusters);
            print_list(format, &format!("Principals with {}", role), &principals)
        }
        LookupCommands::Roles { principal, scope } => {
            let clusters = ids.scope_for(scope)?;
            let roles = client.lookup_roles_in(&principal, &clusters);
            print_list(format, &format!("Roles of {}", principal), &roles)
        }
        LookupCommands::Resources {
            principal,
            role,
            scope,
        } => {
            let clusters = ids.scope_for(scope)?;
            let resources = client.lookup_resources_in(&principal, &role, &clusters);
            print_list(
                format,
                &format!("Resources of {} as {}", principal, role),
                &resources,
            )
        }
    }
}

fn report_binding(
    format: OutputFormat,
    verb: &str,
    binding: &streamline_rbac::RoleBinding,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "principal": binding.principal(),
            "role": binding.role(),
            "resource": binding.target(),
            "cluster_level": binding.is_cluster_level(),
            "scope": binding.scope().clusters(),
        })),
        OutputFormat::Text => {
            print_success(&format!("{} {}", verb, binding));
            Ok(())
        }
    }
}

fn run_config(action: &ConfigCommands, config: &RbacConfig) -> Result<()> {
    match action {
        ConfigCommands::Example => {
            print!("{}", ConfigFile::generate_example());
            Ok(())
        }
        ConfigCommands::Show => {
            let mut shown = ConfigFile::default();
            shown.mds.server_url = Some(config.server_url.clone());
            shown.mds.user = config.user.clone();
            shown.mds.password = config.password.as_ref().map(|_| "********".to_string());
            shown.clusters = config.cluster_ids.clone();
            shown.http = config.http.clone();
            let rendered = toml::to_string_pretty(&shown).map_err(|e| {
                streamline_rbac::RbacError::Config(format!("Failed to render configuration: {}", e))
            })?;
            print!("{}", rendered);
            Ok(())
        }
    }
}
