//! Task definition registration

use tracing::info;

use crate::errors::{DeployError, ResultExt};
use crate::models::task_definition::{RegisterTaskDefinitionRequest, TaskDefinition};
use crate::platform::EcsApi;

/// Register a new revision from a loaded definition
///
/// Only caller-suppliable fields are sent; platform-assigned ones such as the
/// ARN, revision and status are dropped. Failures are not retried.
pub async fn register_task_definition(
    ecs: &dyn EcsApi,
    task_definition: &TaskDefinition,
) -> Result<TaskDefinition, DeployError> {
    info!("Registering a new task definition...");

    let request = RegisterTaskDefinitionRequest::from(task_definition);
    let output = ecs
        .register_task_definition(&request)
        .await
        .with_context(|| format!("failed to register task definition {}", request.family))?;

    info!(
        "Task definition is registered {}",
        output.task_definition.name()
    );
    Ok(output.task_definition)
}
