//! Live status renderer
//!
//! Background loop that re-fetches status on a fixed tick and repaints the
//! block it printed on the previous tick. Runs for the duration of one wait
//! and stops when its cancellation token fires.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::DeployError;
use crate::models::logs::GetLogEventsRequest;
use crate::models::service::DescribeServicesRequest;
use crate::platform::{EcsApi, LogsApi};
use crate::terminal::format::{events_since, format_deployment, format_event, format_log_event};
use crate::terminal::Console;

/// Renderer worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Tick interval
    pub interval: Duration,
}

/// Something the renderer can poll for a fresh block of lines
#[async_trait]
pub trait StatusSource: Send {
    async fn fetch(&mut self) -> Result<Vec<String>, DeployError>;
}

/// Deployments of one service plus the events created since a wait began
pub struct ServiceDeploymentsSource {
    ecs: Arc<dyn EcsApi>,
    request: DescribeServicesRequest,
    started_at: DateTime<Utc>,
    width: usize,
}

impl ServiceDeploymentsSource {
    pub fn new(
        ecs: Arc<dyn EcsApi>,
        request: DescribeServicesRequest,
        started_at: DateTime<Utc>,
        width: usize,
    ) -> Self {
        Self {
            ecs,
            request,
            started_at,
            width,
        }
    }
}

#[async_trait]
impl StatusSource for ServiceDeploymentsSource {
    async fn fetch(&mut self) -> Result<Vec<String>, DeployError> {
        let output = self.ecs.describe_services(&self.request).await?;
        let Some(service) = output.services.first() else {
            return Ok(Vec::new());
        };

        let mut lines: Vec<String> = service.deployments.iter().map(format_deployment).collect();
        for event in events_since(&service.events, self.started_at) {
            lines.extend(format_event(event, self.width));
        }
        Ok(lines)
    }
}

/// Log records of one task's log stream
pub struct TaskLogSource {
    logs: Arc<dyn LogsApi>,
    request: GetLogEventsRequest,
    width: usize,
}

impl TaskLogSource {
    /// Tail `group`/`stream` from `started_at` onwards
    pub fn new(
        logs: Arc<dyn LogsApi>,
        group: &str,
        stream: &str,
        started_at: DateTime<Utc>,
        width: usize,
    ) -> Self {
        Self {
            logs,
            request: GetLogEventsRequest {
                log_group_name: group.to_string(),
                log_stream_name: stream.to_string(),
                start_time: started_at.timestamp_millis(),
                start_from_head: false,
            },
            width,
        }
    }

    pub fn request(&self) -> &GetLogEventsRequest {
        &self.request
    }
}

#[async_trait]
impl StatusSource for TaskLogSource {
    async fn fetch(&mut self) -> Result<Vec<String>, DeployError> {
        let output = self.logs.get_log_events(&self.request).await?;
        Ok(output
            .events
            .iter()
            .flat_map(|event| format_log_event(event, self.width))
            .collect())
    }
}

/// Run the renderer until `cancel` fires
///
/// Fetch errors never end the loop: the previous block stays on screen and
/// the next tick tries again.
pub async fn run<T, S, F>(
    options: Options,
    mut source: T,
    console: Console,
    sleep_fn: S,
    cancel: CancellationToken,
) where
    T: StatusSource,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    debug!("Renderer starting, interval {:?}", options.interval);
    let mut printed = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Renderer stopped");
                return;
            }
            _ = sleep_fn(options.interval) => {}
        }

        match source.fetch().await {
            Ok(lines) => {
                console.erase_lines(printed);
                printed = console.print_lines(&lines);
            }
            Err(e) => {
                debug!("Status fetch failed: {}", e);
            }
        }
    }
}
