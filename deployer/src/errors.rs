//! Error types for ecsdeploy

use thiserror::Error;

/// Main error type for deployment operations
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error reported by the remote platform itself
    #[error("{code}: {message}")]
    ApiError { code: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Waiter failure: {0}")]
    WaiterFailure(String),

    #[error("Confirmation failed: {0}")]
    ConfirmationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<DeployError>,
    },
}

impl DeployError {
    /// Wrap this error with a description of the step that failed
    pub fn wrap(self, context: impl Into<String>) -> Self {
        DeployError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context wrappers
    pub fn root(&self) -> &DeployError {
        match self {
            DeployError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), DeployError::NotFound(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), DeployError::Timeout(_))
    }

    /// Whether the platform refused the call for lack of permissions
    pub fn is_access_denied(&self) -> bool {
        match self.root() {
            DeployError::ApiError { code, .. } => code.contains("AccessDenied"),
            _ => false,
        }
    }
}

/// Context wrapping for results, in the spirit of `anyhow::Context`
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T, DeployError>;

    fn with_context<C, F>(self, f: F) -> Result<T, DeployError>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<DeployError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, DeployError> {
        self.map_err(|e| e.into().wrap(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, DeployError>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().wrap(f()))
    }
}
