//! One-off tasks: launching, inspecting and locating their logs

use tracing::info;

use crate::errors::{DeployError, ResultExt};
use crate::models::service::Service;
use crate::models::task::{DescribeTasksRequest, RunTaskRequest, Task, TaskOverride};
use crate::models::task_definition::TaskDefinition;
use crate::platform::EcsApi;

/// Run-task request reusing the service's network, launch and placement setup
pub fn run_task_request(
    cluster: &str,
    task_definition_arn: &str,
    service: &Service,
    overrides: Option<TaskOverride>,
    count: i64,
) -> RunTaskRequest {
    RunTaskRequest {
        cluster: cluster.to_string(),
        task_definition: task_definition_arn.to_string(),
        count,
        network_configuration: service.network_configuration.clone(),
        launch_type: service.launch_type.clone(),
        overrides,
        capacity_provider_strategy: service.capacity_provider_strategy.clone(),
        placement_constraints: service.placement_constraints.clone(),
        placement_strategy: service.placement_strategy.clone(),
        platform_version: service.platform_version.clone(),
    }
}

/// Start a task, returning the first one launched
pub async fn run_task(ecs: &dyn EcsApi, request: &RunTaskRequest) -> Result<Task, DeployError> {
    info!("Running task");

    let output = ecs.run_task(request).await.context("failed to run task")?;
    if let Some(failure) = output.failures.first() {
        info!("Task ARN: {}", failure.arn);
        return Err(DeployError::TaskFailed(failure.reason.clone()));
    }
    let task = output
        .tasks
        .into_iter()
        .next()
        .ok_or_else(|| DeployError::Internal("run task returned no task".to_string()))?;

    info!("Task ARN: {}", task.task_arn);
    Ok(task)
}

/// Check how a stopped task ended
///
/// Looks at the container named `container`, or the first one, and fails with
/// `TaskFailed` on a non-zero exit code or a stop reason.
pub async fn describe_task_status(
    ecs: &dyn EcsApi,
    cluster: &str,
    task: &Task,
    container: Option<&str>,
) -> Result<(), DeployError> {
    let output = ecs
        .describe_tasks(&DescribeTasksRequest {
            cluster: cluster.to_string(),
            tasks: vec![task.task_arn.clone()],
        })
        .await
        .context("failed to describe tasks")?;

    if let Some(failure) = output.failures.first() {
        info!("Task ARN: {}", failure.arn);
        return Err(DeployError::TaskFailed(failure.reason.clone()));
    }
    let described = output
        .tasks
        .first()
        .ok_or_else(|| DeployError::NotFound(format!("task {}", task.task_arn)))?;
    let Some(container) = described.container_or_first(container) else {
        return Ok(());
    };

    match (container.exit_code, &container.reason) {
        (Some(code), reason) if code != 0 => {
            let mut message = format!("Container: {}, Exit Code: {}", container.name, code);
            if let Some(reason) = reason {
                message.push_str(&format!(", Reason: {}", reason));
            }
            Err(DeployError::TaskFailed(message))
        }
        (_, Some(reason)) => Err(DeployError::TaskFailed(format!(
            "Container: {}, Reason: {}",
            container.name, reason
        ))),
        _ => Ok(()),
    }
}

/// Where a task's log records land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub group: String,
    pub stream: String,
}

/// Log group and stream of `task`, when its primary container ships logs to
/// the remote log service with a stream prefix
pub fn log_target(task: &Task, task_definition: &TaskDefinition) -> Option<LogTarget> {
    let container = task_definition.primary_container()?;
    let (group, prefix) = container.log_configuration.as_ref()?.awslogs_target()?;
    Some(LogTarget {
        group: group.to_string(),
        stream: format!("{}/{}/{}", prefix, container.name, task.id()),
    })
}
