//! Task models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::service::{
    CapacityProviderStrategyItem, Failure, NetworkConfiguration, PlacementConstraint,
    PlacementStrategy,
};
use crate::models::timestamp::epoch_seconds_opt;

/// A running or stopped unit of execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_arn: String,

    #[serde(default)]
    pub task_definition_arn: String,

    /// PROVISIONING, PENDING, RUNNING, ..., STOPPED
    #[serde(default)]
    pub last_status: String,

    #[serde(default)]
    pub desired_status: String,

    #[serde(default)]
    pub containers: Vec<Container>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_reason: Option<String>,

    #[serde(
        default,
        with = "epoch_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "epoch_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub stopped_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Task id, the last path segment of the task ARN
    pub fn id(&self) -> &str {
        crate::utils::arn_to_name(&self.task_arn)
    }

    pub fn is_stopped(&self) -> bool {
        self.last_status == "STOPPED"
    }

    /// The container named `name`, falling back to the first container
    pub fn container_or_first(&self, name: Option<&str>) -> Option<&Container> {
        name.and_then(|name| self.containers.iter().find(|c| c.name == name))
            .or_else(|| self.containers.first())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default)]
    pub last_status: String,
}

/// Per-task overrides passed to RunTask
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOverride {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_overrides: Vec<ContainerOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerOverride {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<KeyValuePair>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTasksRequest {
    pub cluster: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTasksResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub failures: Vec<Failure>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskRequest {
    pub cluster: String,
    pub task_definition: String,
    pub count: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<TaskOverride>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capacity_provider_strategy: Vec<CapacityProviderStrategyItem>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_constraints: Vec<PlacementConstraint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_strategy: Vec<PlacementStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub failures: Vec<Failure>,
}
