//! Application autoscaling models

use serde::{Deserialize, Serialize};

/// Namespace of scalable targets owned by the container service
pub const ECS_SERVICE_NAMESPACE: &str = "ecs";

/// The only dimension this tool manages
pub const DESIRED_COUNT_DIMENSION: &str = "ecs:service:DesiredCount";

/// Resource id of a service's scalable target
pub fn service_resource_id(cluster: &str, service: &str) -> String {
    format!("service/{}/{}", cluster, service)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScalableTarget {
    pub service_namespace: String,
    pub resource_id: String,
    pub scalable_dimension: String,

    #[serde(default)]
    pub min_capacity: i64,

    #[serde(default)]
    pub max_capacity: i64,

    #[serde(default, rename = "RoleARN", skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended_state: Option<SuspendedState>,
}

/// Suspension flags of a scalable target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuspendedState {
    #[serde(default)]
    pub dynamic_scaling_in_suspended: bool,

    #[serde(default)]
    pub dynamic_scaling_out_suspended: bool,

    #[serde(default)]
    pub scheduled_scaling_suspended: bool,
}

impl SuspendedState {
    /// All three flags set to `suspended`
    pub fn all(suspended: bool) -> Self {
        Self {
            dynamic_scaling_in_suspended: suspended,
            dynamic_scaling_out_suspended: suspended,
            scheduled_scaling_suspended: suspended,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScalingPolicy {
    #[serde(default)]
    pub policy_name: String,

    #[serde(default)]
    pub policy_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_tracking_scaling_policy_configuration: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_scaling_policy_configuration: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeScalableTargetsRequest {
    pub service_namespace: String,
    pub resource_ids: Vec<String>,
    pub scalable_dimension: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl DescribeScalableTargetsRequest {
    /// Targets bound to a service's desired count
    pub fn for_service(cluster: &str, service: &str) -> Self {
        Self {
            service_namespace: ECS_SERVICE_NAMESPACE.to_string(),
            resource_ids: vec![service_resource_id(cluster, service)],
            scalable_dimension: DESIRED_COUNT_DIMENSION.to_string(),
            next_token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeScalableTargetsResponse {
    #[serde(default)]
    pub scalable_targets: Vec<ScalableTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterScalableTargetRequest {
    pub service_namespace: String,
    pub resource_id: String,
    pub scalable_dimension: String,
    pub suspended_state: SuspendedState,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterScalableTargetResponse {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeScalingPoliciesRequest {
    pub service_namespace: String,
    pub resource_id: String,
    pub scalable_dimension: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeScalingPoliciesResponse {
    #[serde(default)]
    pub scaling_policies: Vec<ScalingPolicy>,
}
