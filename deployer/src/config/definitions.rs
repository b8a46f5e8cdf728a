//! Task and service definition loading

use std::path::Path;

use tracing::info;

use crate::errors::{DeployError, ResultExt};
use crate::filesys::file::File;
use crate::models::service::CreateServiceRequest;
use crate::models::task_definition::TaskDefinition;

const DAEMON_STRATEGY: &str = "DAEMON";

/// Load a task definition file
///
/// Accepts either a bare task definition or the `{"taskDefinition": {...}}`
/// envelope produced by a describe call.
pub async fn load_task_definition(path: &Path) -> Result<TaskDefinition, DeployError> {
    info!("Creating a new task definition by {}", path.display());
    let value: serde_json::Value = File::new(path).read_json().await?;
    parse_task_definition(value)
        .with_context(|| format!("invalid task definition {}", path.display()))
}

pub fn parse_task_definition(mut value: serde_json::Value) -> Result<TaskDefinition, DeployError> {
    let inner = value
        .as_object_mut()
        .and_then(|object| object.remove("taskDefinition"));
    let td = serde_json::from_value(inner.unwrap_or(value))?;
    Ok(td)
}

/// Load a service definition file as a create-service request
pub async fn load_service_definition(
    path: Option<&Path>,
    cluster: &str,
    service: &str,
) -> Result<CreateServiceRequest, DeployError> {
    let path = path.ok_or_else(|| {
        DeployError::ConfigError("service_definition is not defined".to_string())
    })?;
    let request: CreateServiceRequest = File::new(path).read_json().await?;
    Ok(prepare_service_definition(request, cluster, service))
}

/// Bind a loaded definition to the configured cluster and service
///
/// Replica services default to one task; daemon services carry no count.
pub fn prepare_service_definition(
    mut request: CreateServiceRequest,
    cluster: &str,
    service: &str,
) -> CreateServiceRequest {
    request.cluster = cluster.to_string();
    request.service_name = service.to_string();
    request.desired_count = match request.scheduling_strategy.as_deref() {
        Some(DAEMON_STRATEGY) => None,
        _ => Some(request.desired_count.unwrap_or(1)),
    };
    request
}
