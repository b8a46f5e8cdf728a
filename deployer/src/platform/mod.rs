//! Remote service facade
//!
//! Typed wrappers around the orchestration platform's control plane, its log
//! service and its autoscaling service. Everything above this layer talks to
//! the platform only through these traits, so tests swap in fakes.

pub mod waiters;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DeployError;
use crate::models::autoscaling::{
    DescribeScalableTargetsRequest, DescribeScalableTargetsResponse,
    DescribeScalingPoliciesRequest, DescribeScalingPoliciesResponse,
    RegisterScalableTargetRequest, RegisterScalableTargetResponse,
};
use crate::models::logs::{GetLogEventsRequest, GetLogEventsResponse};
use crate::models::service::{
    CreateServiceRequest, CreateServiceResponse, DeleteServiceRequest, DeleteServiceResponse,
    DescribeServicesRequest, DescribeServicesResponse, UpdateServiceRequest,
    UpdateServiceResponse,
};
use crate::models::task::{
    DescribeTasksRequest, DescribeTasksResponse, RunTaskRequest, RunTaskResponse,
};
use crate::models::task_definition::{
    DescribeTaskDefinitionRequest, DescribeTaskDefinitionResponse, ListTaskDefinitionsRequest,
    ListTaskDefinitionsResponse, RegisterTaskDefinitionRequest, RegisterTaskDefinitionResponse,
};

/// Container service control plane
#[async_trait]
pub trait EcsApi: Send + Sync {
    async fn describe_services(
        &self,
        request: &DescribeServicesRequest,
    ) -> Result<DescribeServicesResponse, DeployError>;

    async fn describe_tasks(
        &self,
        request: &DescribeTasksRequest,
    ) -> Result<DescribeTasksResponse, DeployError>;

    async fn describe_task_definition(
        &self,
        request: &DescribeTaskDefinitionRequest,
    ) -> Result<DescribeTaskDefinitionResponse, DeployError>;

    async fn list_task_definitions(
        &self,
        request: &ListTaskDefinitionsRequest,
    ) -> Result<ListTaskDefinitionsResponse, DeployError>;

    async fn register_task_definition(
        &self,
        request: &RegisterTaskDefinitionRequest,
    ) -> Result<RegisterTaskDefinitionResponse, DeployError>;

    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskResponse, DeployError>;

    async fn create_service(
        &self,
        request: &CreateServiceRequest,
    ) -> Result<CreateServiceResponse, DeployError>;

    async fn update_service(
        &self,
        request: &UpdateServiceRequest,
    ) -> Result<UpdateServiceResponse, DeployError>;

    async fn delete_service(
        &self,
        request: &DeleteServiceRequest,
    ) -> Result<DeleteServiceResponse, DeployError>;
}

/// Log service data plane
#[async_trait]
pub trait LogsApi: Send + Sync {
    async fn get_log_events(
        &self,
        request: &GetLogEventsRequest,
    ) -> Result<GetLogEventsResponse, DeployError>;
}

/// Application autoscaling control plane
#[async_trait]
pub trait AutoScalingApi: Send + Sync {
    async fn describe_scalable_targets(
        &self,
        request: &DescribeScalableTargetsRequest,
    ) -> Result<DescribeScalableTargetsResponse, DeployError>;

    async fn register_scalable_target(
        &self,
        request: &RegisterScalableTargetRequest,
    ) -> Result<RegisterScalableTargetResponse, DeployError>;

    async fn describe_scaling_policies(
        &self,
        request: &DescribeScalingPoliciesRequest,
    ) -> Result<DescribeScalingPoliciesResponse, DeployError>;
}

/// One handle per remote API
#[derive(Clone)]
pub struct Platform {
    pub ecs: Arc<dyn EcsApi>,
    pub logs: Arc<dyn LogsApi>,
    pub autoscaling: Arc<dyn AutoScalingApi>,
}

impl Platform {
    pub fn new(
        ecs: Arc<dyn EcsApi>,
        logs: Arc<dyn LogsApi>,
        autoscaling: Arc<dyn AutoScalingApi>,
    ) -> Self {
        Self {
            ecs,
            logs,
            autoscaling,
        }
    }
}
