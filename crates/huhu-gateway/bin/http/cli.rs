use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, ValueEnum};
use huhu_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "HUHU_HOST";
pub const ADMIN_API_KEY_ENV: &str = "ADMIN_API_KEY";
pub const STORAGE_BACKEND_ENV: &str = "HUHU_STORAGE_BACKEND";
pub const DATABASE_PATH_ENV: &str = "HUHU_DATABASE_PATH";
pub const DATABASE_MAX_CONNECTIONS_ENV: &str = "HUHU_DATABASE_MAX_CONNECTIONS";
pub const REQUEST_TIMEOUT_ENV: &str = "HUHU_REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "HUHU_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATABASE_PATH: &str = "./jokes.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "huhu-gateway")]
pub struct CLI {
    #[arg(long, env = PORT_ENV)]
    pub port: u16,

    #[arg(long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    #[arg(
        long,
        env = ADMIN_API_KEY_ENV,
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub admin_api_key: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATABASE_PATH_ENV, default_value = DEFAULT_DATABASE_PATH)]
    pub database_path: String,

    #[arg(long, env = DATABASE_MAX_CONNECTIONS_ENV, default_value_t = 5)]
    pub max_connections: u32,

    #[arg(long, env = REQUEST_TIMEOUT_ENV, default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
