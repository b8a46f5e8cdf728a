//! Task definition models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timestamp::epoch_seconds_opt;

/// An immutable, registered (or loaded-from-file) task definition
///
/// Platform-assigned fields (`taskDefinitionArn`, `revision`, `status`,
/// `registeredAt`, ...) are read but never replayed into a registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definition_arn: Option<String>,

    pub family: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub container_definitions: Vec<ContainerDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_constraints: Vec<TaskDefinitionPlacementConstraint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_compatibilities: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_configuration: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatibilities: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_attributes: Vec<serde_json::Value>,

    #[serde(
        default,
        with = "epoch_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub registered_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_by: Option<String>,
}

impl TaskDefinition {
    /// `family:revision`, used to identify a registered revision in logs
    pub fn name(&self) -> String {
        match self.revision {
            Some(revision) => format!("{}:{}", self.family, revision),
            None => self.family.clone(),
        }
    }

    /// The first container, whose log configuration drives log tailing
    pub fn primary_container(&self) -> Option<&ContainerDefinition> {
        self.container_definitions.first()
    }
}

/// A container within a task definition
///
/// Only the fields this tool inspects are typed; everything else is kept
/// verbatim so it survives re-registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfiguration>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    pub log_driver: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secret_options: Vec<serde_json::Value>,
}

impl LogConfiguration {
    pub const AWSLOGS_DRIVER: &'static str = "awslogs";
    pub const GROUP_OPTION: &'static str = "awslogs-group";
    pub const STREAM_PREFIX_OPTION: &'static str = "awslogs-stream-prefix";

    /// Log group and stream prefix, when logs go to the remote log service
    pub fn awslogs_target(&self) -> Option<(&str, &str)> {
        if self.log_driver != Self::AWSLOGS_DRIVER {
            return None;
        }
        let group = self.options.get(Self::GROUP_OPTION)?;
        let prefix = self.options.get(Self::STREAM_PREFIX_OPTION)?;
        Some((group.as_str(), prefix.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinitionPlacementConstraint {
    #[serde(rename = "type")]
    pub constraint_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

/// Registration request, restricted to the fields a caller may supply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTaskDefinitionRequest {
    pub family: String,

    pub container_definitions: Vec<ContainerDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_constraints: Vec<TaskDefinitionPlacementConstraint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_compatibilities: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_configuration: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<serde_json::Value>,
}

impl From<&TaskDefinition> for RegisterTaskDefinitionRequest {
    fn from(td: &TaskDefinition) -> Self {
        Self {
            family: td.family.clone(),
            container_definitions: td.container_definitions.clone(),
            cpu: td.cpu.clone(),
            memory: td.memory.clone(),
            execution_role_arn: td.execution_role_arn.clone(),
            task_role_arn: td.task_role_arn.clone(),
            network_mode: td.network_mode.clone(),
            placement_constraints: td.placement_constraints.clone(),
            requires_compatibilities: td.requires_compatibilities.clone(),
            proxy_configuration: td.proxy_configuration.clone(),
            volumes: td.volumes.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTaskDefinitionResponse {
    pub task_definition: TaskDefinition,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTaskDefinitionRequest {
    pub task_definition: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTaskDefinitionResponse {
    pub task_definition: TaskDefinition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTaskDefinitionsRequest {
    pub family_prefix: String,

    pub sort: SortOrder,

    pub max_results: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTaskDefinitionsResponse {
    #[serde(default)]
    pub task_definition_arns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}
