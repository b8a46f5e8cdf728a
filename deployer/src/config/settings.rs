//! Settings file management

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Default settings file name, looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "ecsdeploy.json";

/// Tool settings
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Platform region, used to derive default endpoints
    #[serde(default)]
    pub region: String,

    /// Cluster the service lives in
    pub cluster: String,

    /// Service name
    pub service: String,

    /// Create-service request file
    #[serde(default)]
    pub service_definition: Option<PathBuf>,

    /// Task definition file
    pub task_definition: PathBuf,

    /// Overall command timeout in seconds, 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Width status lines are wrapped to
    #[serde(default = "default_terminal_width")]
    pub terminal_width: usize,

    /// Endpoint overrides
    #[serde(default)]
    pub endpoints: EndpointSettings,

    /// Bearer token sent with every platform request
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub auth_token: Option<SecretString>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_terminal_width() -> usize {
    90
}

/// Per-API base URLs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointSettings {
    #[serde(default)]
    pub ecs: Option<String>,

    #[serde(default)]
    pub logs: Option<String>,

    #[serde(default)]
    pub application_autoscaling: Option<String>,
}

impl Settings {
    /// Load, resolve and validate a settings file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DeployError> {
        let path = path.as_ref();
        let mut settings: Settings = File::new(path).read_json().await?;
        if let Some(base) = path.parent() {
            settings.resolve_paths(base);
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Make definition paths relative to the settings file's directory
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.task_definition.is_relative() {
            self.task_definition = base.join(&self.task_definition);
        }
        if let Some(path) = self.service_definition.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn validate(&self) -> Result<(), DeployError> {
        if self.cluster.trim().is_empty() {
            return Err(DeployError::ConfigError("cluster is required".to_string()));
        }
        if self.service.trim().is_empty() {
            return Err(DeployError::ConfigError("service is required".to_string()));
        }
        if self.task_definition.as_os_str().is_empty() {
            return Err(DeployError::ConfigError("task_definition is required".to_string()));
        }
        if self.terminal_width == 0 {
            return Err(DeployError::ConfigError(
                "terminal_width must be positive".to_string(),
            ));
        }
        self.ecs_endpoint()?;
        self.logs_endpoint()?;
        self.autoscaling_endpoint()?;
        Ok(())
    }

    /// Overall command timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn ecs_endpoint(&self) -> Result<Url, DeployError> {
        self.endpoint(self.endpoints.ecs.as_deref(), "ecs")
    }

    pub fn logs_endpoint(&self) -> Result<Url, DeployError> {
        self.endpoint(self.endpoints.logs.as_deref(), "logs")
    }

    pub fn autoscaling_endpoint(&self) -> Result<Url, DeployError> {
        self.endpoint(
            self.endpoints.application_autoscaling.as_deref(),
            "application-autoscaling",
        )
    }

    fn endpoint(&self, configured: Option<&str>, api: &str) -> Result<Url, DeployError> {
        let raw = match configured {
            Some(raw) => raw.to_string(),
            None if self.region.trim().is_empty() => {
                return Err(DeployError::ConfigError(format!(
                    "region is required to derive the {api} endpoint"
                )));
            }
            None => format!("https://{}.{}.amazonaws.com/", api, self.region),
        };
        Url::parse(&raw)
            .map_err(|e| DeployError::ConfigError(format!("invalid {api} endpoint {raw}: {e}")))
    }
}
