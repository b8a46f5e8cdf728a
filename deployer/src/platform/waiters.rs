//! Waiter primitives
//!
//! Poll a describe call until an acceptor matches, with an explicit delay and
//! attempt budget instead of any built-in default.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::errors::{DeployError, ResultExt};
use crate::models::service::{DescribeServicesRequest, DescribeServicesResponse};
use crate::models::task::{DescribeTasksRequest, DescribeTasksResponse};
use crate::platform::EcsApi;

/// Polling budget for a waiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaiterConfig {
    /// Sleep between two polls
    pub delay: Duration,

    /// Total number of polls, the first one issued immediately
    pub max_attempts: u32,
}

/// Outcome of evaluating one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acceptor {
    Success,
    Retry,
    Failure(String),
}

/// Stability check for services
///
/// Success once every service runs a single deployment with its desired count;
/// failure if a service is missing, draining or inactive.
pub fn services_stable(output: &DescribeServicesResponse) -> Acceptor {
    if let Some(failure) = output.failures.iter().find(|f| f.reason == "MISSING") {
        return Acceptor::Failure(format!("service {} is missing", failure.arn));
    }
    if let Some(service) = output
        .services
        .iter()
        .find(|s| s.status == "DRAINING" || s.status == "INACTIVE")
    {
        return Acceptor::Failure(format!(
            "service {} is {}",
            service.service_name, service.status
        ));
    }
    if output.services.is_empty() {
        return Acceptor::Retry;
    }
    let stable = output
        .services
        .iter()
        .all(|s| s.deployments.len() == 1 && s.running_count == s.desired_count);
    if stable {
        Acceptor::Success
    } else {
        Acceptor::Retry
    }
}

/// Stop check for tasks
pub fn tasks_stopped(output: &DescribeTasksResponse) -> Acceptor {
    if let Some(failure) = output.failures.iter().find(|f| f.reason == "MISSING") {
        return Acceptor::Failure(format!("task {} is missing", failure.arn));
    }
    if !output.tasks.is_empty() && output.tasks.iter().all(|t| t.is_stopped()) {
        Acceptor::Success
    } else {
        Acceptor::Retry
    }
}

async fn poll<P, PF, T, A, S, F>(
    name: &str,
    config: WaiterConfig,
    mut describe: P,
    accept: A,
    sleep_fn: S,
) -> Result<(), DeployError>
where
    P: FnMut() -> PF,
    PF: Future<Output = Result<T, DeployError>>,
    A: Fn(&T) -> Acceptor,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    for attempt in 1..=config.max_attempts {
        let output = describe()
            .await
            .with_context(|| format!("{name}: describe failed on attempt {attempt}"))?;

        match accept(&output) {
            Acceptor::Success => return Ok(()),
            Acceptor::Failure(reason) => {
                return Err(DeployError::WaiterFailure(format!("{name}: {reason}")));
            }
            Acceptor::Retry => {
                debug!("{}: attempt {}/{} not yet satisfied", name, attempt, config.max_attempts);
            }
        }

        if attempt < config.max_attempts {
            sleep_fn(config.delay).await;
        }
    }

    Err(DeployError::Timeout(format!(
        "{name}: exceeded {} attempts",
        config.max_attempts
    )))
}

/// Block until the service is stable or the attempt budget runs out
pub async fn wait_until_services_stable<S, F>(
    ecs: &dyn EcsApi,
    request: &DescribeServicesRequest,
    config: WaiterConfig,
    sleep_fn: S,
) -> Result<(), DeployError>
where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    poll(
        "ServicesStable",
        config,
        || ecs.describe_services(request),
        services_stable,
        sleep_fn,
    )
    .await
}

/// Block until every task is stopped or the attempt budget runs out
pub async fn wait_until_tasks_stopped<S, F>(
    ecs: &dyn EcsApi,
    request: &DescribeTasksRequest,
    config: WaiterConfig,
    sleep_fn: S,
) -> Result<(), DeployError>
where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    poll(
        "TasksStopped",
        config,
        || ecs.describe_tasks(request),
        tasks_stopped,
        sleep_fn,
    )
    .await
}
