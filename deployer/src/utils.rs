//! Small helpers shared across commands

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Build metadata printed by the `version` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub commit: String,
    pub built_at: String,
}

pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: option_env!("ECSDEPLOY_COMMIT").unwrap_or("unknown").to_string(),
        built_at: option_env!("ECSDEPLOY_BUILT_AT").unwrap_or("unknown").to_string(),
    }
}

/// Shareable sleep function, swapped out in tests to avoid wall-clock waits
pub type SleepFn = Arc<dyn Fn(Duration) -> BoxFuture<'static, ()> + Send + Sync>;

/// Sleep backed by the tokio timer
pub fn tokio_sleep() -> SleepFn {
    Arc::new(|wait: Duration| -> BoxFuture<'static, ()> { Box::pin(tokio::time::sleep(wait)) })
}

/// Strip everything up to the last `/` of an ARN
///
/// `arn:aws:ecs:ap-northeast-1:123456789012:task-definition/app:39` becomes `app:39`.
pub fn arn_to_name(arn: &str) -> &str {
    match arn.rsplit_once('/') {
        Some((_, name)) => name,
        None => arn,
    }
}

/// Family part of a task definition ARN or `family:revision` name
pub fn task_definition_family(arn: &str) -> &str {
    let name = arn_to_name(arn);
    match name.split_once(':') {
        Some((family, _)) => family,
        None => name,
    }
}
