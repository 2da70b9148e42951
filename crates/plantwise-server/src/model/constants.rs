//! Configuration keys and their defaults

pub const SERVER_ADDRESS: &str = "server.address";
pub const SERVER_PORT: &str = "server.port";
pub const SERVER_CONTEXT_PATH: &str = "server.contextPath";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_CONTEXT_PATH: &str = "api";

pub const DB_URL: &str = "db.url";
pub const DB_MAX_CONNECTIONS: &str = "db.pool.maxConnections";
pub const DB_MIN_CONNECTIONS: &str = "db.pool.minConnections";
pub const DB_CONNECT_TIMEOUT_SECONDS: &str = "db.pool.connectTimeoutSeconds";
pub const DB_ACQUIRE_TIMEOUT_SECONDS: &str = "db.pool.acquireTimeoutSeconds";
pub const DB_AUTO_MIGRATE: &str = "db.autoMigrate";
pub const DB_SQL_LOGGING: &str = "db.sqlLogging";

pub const DEFAULT_DB_URL: &str = "sqlite://plantwise.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECONDS: u64 = 8;

pub const LOGS_PATH: &str = "logs.path";
pub const LOGS_LEVEL: &str = "logs.level";
pub const LOGS_CONSOLE: &str = "logs.console";
pub const LOGS_FILE: &str = "logs.file";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Prefix of environment variables overriding configuration keys
pub const ENV_PREFIX: &str = "PLANTWISE";
pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";
