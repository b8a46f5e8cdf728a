//! Convergence waiter
//!
//! Blocks until a service is stable or a task has stopped, while a renderer
//! runs alongside on its own task. The renderer is cancelled whenever the
//! wait returns, and also when the waiting future is dropped.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::deploy::task::log_target;
use crate::errors::{DeployError, ResultExt};
use crate::models::service::DescribeServicesRequest;
use crate::models::task::{DescribeTasksRequest, Task};
use crate::models::task_definition::TaskDefinition;
use crate::platform::waiters::{
    wait_until_services_stable, wait_until_tasks_stopped, WaiterConfig,
};
use crate::platform::Platform;
use crate::terminal::Console;
use crate::utils::SleepFn;
use crate::workers::renderer::{self, ServiceDeploymentsSource, StatusSource, TaskLogSource};

/// Waiter options
#[derive(Debug, Clone)]
pub struct Options {
    /// Overall time budget of one wait
    pub timeout: Duration,

    /// Poll interval of the service stability check
    pub stable_delay: Duration,

    /// Poll interval of the task stop check
    pub task_delay: Duration,

    /// Refresh interval of the live deployment view
    pub service_render_interval: Duration,

    /// Refresh interval of the live log view
    pub task_render_interval: Duration,

    /// Pause before the first log fetch, for the stream to appear
    pub log_stream_delay: Duration,

    /// Pause after a create or update, for the change to show up in describes
    pub service_changed_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            stable_delay: Duration::from_secs(15),
            task_delay: Duration::from_secs(6),
            service_render_interval: Duration::from_secs(10),
            task_render_interval: Duration::from_secs(5),
            log_stream_delay: Duration::from_secs(3),
            service_changed_delay: Duration::from_secs(3),
        }
    }
}

/// Number of polls that makes `timeout` the effective ceiling
///
/// `timeout / delay + 1`, plus one when `timeout` is not a multiple of
/// `delay`, so `attempts * delay >= timeout` always holds.
pub fn wait_attempts(timeout: Duration, delay: Duration) -> u32 {
    let delay_nanos = delay.as_nanos().max(1);
    let timeout_nanos = timeout.as_nanos();
    let mut attempts = timeout_nanos / delay_nanos + 1;
    if timeout_nanos % delay_nanos > 0 {
        attempts += 1;
    }
    u32::try_from(attempts).unwrap_or(u32::MAX)
}

/// Waits on one cluster, rendering progress to the console
#[derive(Clone)]
pub struct Waiter {
    platform: Platform,
    console: Console,
    options: Options,
    sleep: SleepFn,
    cancel: CancellationToken,
}

impl Waiter {
    pub fn new(
        platform: Platform,
        console: Console,
        options: Options,
        sleep: SleepFn,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            platform,
            console,
            options,
            sleep,
            cancel,
        }
    }

    /// Block until the service is stable, rendering deployments and events
    /// created after `started_at`
    pub async fn wait_service_stable(
        &self,
        cluster: &str,
        service: &str,
        started_at: DateTime<Utc>,
    ) -> Result<(), DeployError> {
        info!("Waiting for service stable...(it will take a few minutes)");

        let request = DescribeServicesRequest {
            cluster: cluster.to_string(),
            services: vec![service.to_string()],
        };
        let config = WaiterConfig {
            delay: self.options.stable_delay,
            max_attempts: wait_attempts(self.options.timeout, self.options.stable_delay),
        };
        debug!("Service stable waiter: {:?}", config);

        let source = ServiceDeploymentsSource::new(
            self.platform.ecs.clone(),
            request.clone(),
            started_at,
            self.console.width(),
        );
        let sleep = self.sleep.clone();
        let wait = wait_until_services_stable(
            self.platform.ecs.as_ref(),
            &request,
            config,
            move |d| sleep(d),
        );
        self.with_renderer(self.options.service_render_interval, source, wait)
            .await
            .context("the service still unstable")
    }

    /// Block until `task` stops, tailing its logs when they are shipped to
    /// the remote log service
    pub async fn wait_task_stopped(
        &self,
        cluster: &str,
        task: &Task,
        task_definition: &TaskDefinition,
        started_at: DateTime<Utc>,
    ) -> Result<(), DeployError> {
        info!("Waiting for run task...(it may take a while)");

        let request = DescribeTasksRequest {
            cluster: cluster.to_string(),
            tasks: vec![task.task_arn.clone()],
        };
        let config = WaiterConfig {
            delay: self.options.task_delay,
            max_attempts: wait_attempts(self.options.timeout, self.options.task_delay),
        };
        debug!("Task stopped waiter: {:?}", config);

        let sleep = self.sleep.clone();
        let wait = wait_until_tasks_stopped(
            self.platform.ecs.as_ref(),
            &request,
            config,
            move |d| sleep(d),
        );

        let Some(target) = log_target(task, task_definition) else {
            info!("awslogs not configured");
            return wait.await.context("failed to wait task stopped");
        };
        info!("logGroup: {}", target.group);
        info!("logStream: {}", target.stream);
        (self.sleep)(self.options.log_stream_delay).await;

        let source = TaskLogSource::new(
            self.platform.logs.clone(),
            &target.group,
            &target.stream,
            started_at,
            self.console.width(),
        );
        self.with_renderer(self.options.task_render_interval, source, wait)
            .await
            .context("failed to wait task stopped")
    }

    async fn with_renderer<T, W>(
        &self,
        interval: Duration,
        source: T,
        wait: W,
    ) -> Result<(), DeployError>
    where
        T: StatusSource + 'static,
        W: std::future::Future<Output = Result<(), DeployError>>,
    {
        let token = self.cancel.child_token();
        let guard = token.clone().drop_guard();
        let sleep = self.sleep.clone();
        let handle = tokio::spawn(renderer::run(
            renderer::Options { interval },
            source,
            self.console.clone(),
            move |d| sleep(d),
            token,
        ));

        let result = wait.await;

        drop(guard);
        if let Err(e) = handle.await {
            debug!("Renderer task ended abnormally: {}", e);
        }
        result
    }
}
