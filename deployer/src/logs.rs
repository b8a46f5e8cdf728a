//! Operator log output
//!
//! Progress messages go through `tracing` to stdout, interleaved with the
//! status blocks the console prints. Only this crate logs at the configured
//! level; HTTP and runtime crates stay at `warn` unless `RUST_LOG` says
//! otherwise.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::DeployError;

const CRATE_TARGET: &str = "ecsdeploy";

/// Verbosity of this crate's own log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Filter directives: dependencies at `warn`, this crate at `self`
    pub fn directives(&self) -> String {
        format!("warn,{}={}", CRATE_TARGET, self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(DeployError::ConfigError(format!("unknown log level {other}"))),
        }
    }
}

/// Subscriber setup
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub log_level: LogLevel,

    /// One JSON object per line instead of human-readable text
    pub json_format: bool,

    /// Colorize levels, only when stdout is a terminal
    pub ansi: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            json_format: false,
            ansi: true,
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(options: LogOptions) -> Result<(), DeployError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_level.directives()));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if options.json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stdout))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(options.ansi)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    };
    installed.map_err(|e| DeployError::ConfigError(format!("logging: {e}")))
}
