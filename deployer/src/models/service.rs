//! Service models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timestamp::epoch_seconds_opt;

/// A long-running service as reported by the control plane
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_arn: Option<String>,

    #[serde(default)]
    pub cluster_arn: String,

    /// ACTIVE, DRAINING or INACTIVE
    #[serde(default)]
    pub status: String,

    /// Current task definition ARN
    #[serde(default)]
    pub task_definition: String,

    #[serde(default)]
    pub desired_count: i64,

    #[serde(default)]
    pub running_count: i64,

    #[serde(default)]
    pub pending_count: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling_strategy: Option<String>,

    /// Newest first
    #[serde(default)]
    pub deployments: Vec<Deployment>,

    #[serde(default)]
    pub task_sets: Vec<TaskSet>,

    /// Newest first
    #[serde(default)]
    pub events: Vec<ServiceEvent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_constraints: Vec<PlacementConstraint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_strategy: Vec<PlacementStrategy>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capacity_provider_strategy: Vec<CapacityProviderStrategyItem>,
}

/// A rollout record nested under a service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default)]
    pub id: String,

    /// PRIMARY, ACTIVE or INACTIVE
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub task_definition: String,

    #[serde(default)]
    pub desired_count: i64,

    #[serde(default)]
    pub pending_count: i64,

    #[serde(default)]
    pub running_count: i64,

    #[serde(default)]
    pub failed_tasks: i64,

    /// COMPLETED, FAILED or IN_PROGRESS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollout_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollout_state_reason: Option<String>,

    #[serde(
        default,
        with = "epoch_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "epoch_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A task set used by externally controlled (blue/green) deployments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSet {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub task_definition: String,

    #[serde(default)]
    pub computed_desired_count: i64,

    #[serde(default)]
    pub pending_count: i64,

    #[serde(default)]
    pub running_count: i64,

    /// STEADY_STATE or STABILIZING
    #[serde(default)]
    pub stability_status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    #[serde(default)]
    pub value: f64,

    #[serde(default)]
    pub unit: String,
}

/// Timestamped status message nested under a service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEvent {
    #[serde(default)]
    pub id: String,

    #[serde(
        default,
        with = "epoch_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub message: String,
}

impl ServiceEvent {
    /// Whether the event was created strictly after `instant`
    pub fn is_after(&self, instant: DateTime<Utc>) -> bool {
        self.created_at.is_some_and(|at| at > instant)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awsvpc_configuration: Option<AwsVpcConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsVpcConfiguration {
    #[serde(default)]
    pub subnets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign_public_ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementConstraint {
    #[serde(rename = "type")]
    pub constraint_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStrategy {
    #[serde(rename = "type")]
    pub strategy_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityProviderStrategyItem {
    pub capacity_provider: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<i64>,
}

/// Per-item failure returned next to successful results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    #[serde(default)]
    pub arn: String,

    #[serde(default)]
    pub reason: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesRequest {
    pub cluster: String,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesResponse {
    #[serde(default)]
    pub services: Vec<Service>,

    #[serde(default)]
    pub failures: Vec<Failure>,
}

/// Create-service request, loaded from the service definition file
///
/// Fields this tool never inspects are carried through untouched in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[serde(default)]
    pub cluster: String,

    #[serde(default)]
    pub service_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling_strategy: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceResponse {
    #[serde(default)]
    pub service: Option<Service>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub cluster: String,
    pub service: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_count: Option<i64>,

    #[serde(default)]
    pub force_new_deployment: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceResponse {
    #[serde(default)]
    pub service: Option<Service>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteServiceRequest {
    pub cluster: String,
    pub service: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteServiceResponse {
    #[serde(default)]
    pub service: Option<Service>,
}
