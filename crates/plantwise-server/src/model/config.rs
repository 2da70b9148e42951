//! Configuration management for the Plantwise server
//!
//! Sources, lowest precedence first: `conf/application.yml`, `PLANTWISE.*`
//! environment variables, then command-line flags.

use std::time::Duration;

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::startup::LoggingConfig;

use super::constants::*;

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(version, about = "Plantwise asset management server")]
pub struct Cli {
    /// Configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,
    /// HTTP port
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Create the demo client, plant and library templates if absent
    #[arg(long = "seed")]
    pub seed: bool,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name(&cli.config_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(".")
                    .try_parsing(true),
            );

        if let Some(port) = cli.port {
            builder = builder.set_override(SERVER_PORT, i64::from(port))?;
        }
        if let Some(url) = &cli.database_url {
            builder = builder.set_override(DB_URL, url.as_str())?;
        }

        Ok(Configuration {
            config: builder.build()?,
        })
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Path prefix of the API scopes, normalized to `/<path>`
    pub fn server_context_path(&self) -> String {
        let path = self
            .config
            .get_string(SERVER_CONTEXT_PATH)
            .unwrap_or(DEFAULT_CONTEXT_PATH.to_string());
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    pub fn database_url(&self) -> String {
        self.config
            .get_string(DB_URL)
            .unwrap_or(DEFAULT_DB_URL.to_string())
    }

    pub fn auto_migrate(&self) -> bool {
        self.config.get_bool(DB_AUTO_MIGRATE).unwrap_or(true)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let max_connections = self
            .config
            .get_int(DB_MAX_CONNECTIONS)
            .map(|v| v as u32)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let min_connections = self
            .config
            .get_int(DB_MIN_CONNECTIONS)
            .map(|v| v as u32)
            .unwrap_or(DEFAULT_MIN_CONNECTIONS);
        let connect_timeout = self
            .config
            .get_int(DB_CONNECT_TIMEOUT_SECONDS)
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECONDS);
        let acquire_timeout = self
            .config
            .get_int(DB_ACQUIRE_TIMEOUT_SECONDS)
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECONDS);
        let sqlx_logging = self.config.get_bool(DB_SQL_LOGGING).unwrap_or(false);

        let mut opt = ConnectOptions::new(self.database_url());
        opt.max_connections(max_connections)
            .min_connections(min_connections.min(max_connections))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .acquire_timeout(Duration::from_secs(acquire_timeout))
            .sqlx_logging(sqlx_logging)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        tracing::info!(
            max_connections,
            min_connections,
            connect_timeout,
            acquire_timeout,
            sqlx_logging,
            "Database connection pool configured"
        );

        opt
    }

    pub async fn database_connection(&self) -> Result<DatabaseConnection, sea_orm::DbErr> {
        Database::connect(self.connect_options()).await
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string(LOGS_PATH).ok(),
            self.config.get_bool(LOGS_CONSOLE).unwrap_or(true),
            self.config.get_bool(LOGS_FILE).unwrap_or(true),
            self.config
                .get_string(LOGS_LEVEL)
                .unwrap_or(DEFAULT_LOG_LEVEL.to_string()),
        )
        .with_env_overrides()
    }
}
