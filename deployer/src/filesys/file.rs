//! Definition and settings files on disk

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tokio::fs;

use crate::errors::{DeployError, ResultExt};

/// A JSON document on disk
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the document
    ///
    /// A missing file is reported as `NotFound`; a malformed one names the
    /// line and column serde stopped at.
    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T, DeployError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DeployError::NotFound(format!(
                    "{} does not exist",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            DeployError::ConfigError(format!(
                "{} is not valid JSON at line {} column {}: {}",
                self.path.display(),
                e.line(),
                e.column(),
                e
            ))
        })
    }
}
