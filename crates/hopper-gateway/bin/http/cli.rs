use clap::{Parser, ValueEnum};
use hopper_generator::DEFAULT_LENGTH;
use hopper_shortener::DEFAULT_MAX_ATTEMPTS;
use hopper_telemetry::{LogFormat, TelemetryConfig};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "HOPPER_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "HOPPER_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "HOPPER_MYSQL_DSN";
pub const CODE_LENGTH_ENV: &str = "HOPPER_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "HOPPER_MAX_ATTEMPTS";
pub const PUBLIC_BASE_URL_ENV: &str = "HOPPER_PUBLIC_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "HOPPER_LOG_FORMAT";
pub const LOG_LEVEL_ENV: &str = "HOPPER_LOG_LEVEL";
pub const OTLP_ENDPOINT_ENV: &str = "HOPPER_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4001";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const SERVICE_NAME: &str = "hopper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hopper", about = "A small URL shortener")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_LENGTH)]
    pub code_length: usize,

    /// Code draws per create before giving up on collisions.
    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Prefix for links on the listing page. Empty means root-relative.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = "")]
    pub public_base_url: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    /// Filter directive used when `RUST_LOG` is unset.
    #[arg(long, env = LOG_LEVEL_ENV, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}

impl Cli {
    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig::builder()
            .service_name(SERVICE_NAME)
            .default_directive(self.log_level.clone())
            .format(self.log_format.into())
            .otlp_endpoint(self.otlp_endpoint.clone())
            .build()
    }
}
