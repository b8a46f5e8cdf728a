//! Container service API client

use async_trait::async_trait;

use crate::errors::DeployError;
use crate::http::client::HttpClient;
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
use crate::platform::EcsApi;

pub const TARGET_PREFIX: &str = "AmazonEC2ContainerServiceV20141113";

/// Container service control plane over HTTP
pub struct EcsClient {
    http: HttpClient,
}

impl EcsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl EcsApi for EcsClient {
    async fn describe_services(
        &self,
        request: &DescribeServicesRequest,
    ) -> Result<DescribeServicesResponse, DeployError> {
        self.http.call("DescribeServices", request).await
    }

    async fn describe_tasks(
        &self,
        request: &DescribeTasksRequest,
    ) -> Result<DescribeTasksResponse, DeployError> {
        self.http.call("DescribeTasks", request).await
    }

    async fn describe_task_definition(
        &self,
        request: &DescribeTaskDefinitionRequest,
    ) -> Result<DescribeTaskDefinitionResponse, DeployError> {
        self.http.call("DescribeTaskDefinition", request).await
    }

    async fn list_task_definitions(
        &self,
        request: &ListTaskDefinitionsRequest,
    ) -> Result<ListTaskDefinitionsResponse, DeployError> {
        self.http.call("ListTaskDefinitions", request).await
    }

    async fn register_task_definition(
        &self,
        request: &RegisterTaskDefinitionRequest,
    ) -> Result<RegisterTaskDefinitionResponse, DeployError> {
        self.http.call("RegisterTaskDefinition", request).await
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskResponse, DeployError> {
        self.http.call("RunTask", request).await
    }

    async fn create_service(
        &self,
        request: &CreateServiceRequest,
    ) -> Result<CreateServiceResponse, DeployError> {
        self.http.call("CreateService", request).await
    }

    async fn update_service(
        &self,
        request: &UpdateServiceRequest,
    ) -> Result<UpdateServiceResponse, DeployError> {
        self.http.call("UpdateService", request).await
    }

    async fn delete_service(
        &self,
        request: &DeleteServiceRequest,
    ) -> Result<DeleteServiceResponse, DeployError> {
        self.http.call("DeleteService", request).await
    }
}
