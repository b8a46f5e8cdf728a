//! In-memory platform recording every call

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;

use ecsdeploy::errors::DeployError;
use ecsdeploy::models::autoscaling::{
    DescribeScalableTargetsRequest, DescribeScalableTargetsResponse,
    DescribeScalingPoliciesRequest, DescribeScalingPoliciesResponse,
    RegisterScalableTargetRequest, RegisterScalableTargetResponse, ScalableTarget,
};
use ecsdeploy::models::logs::{GetLogEventsRequest, GetLogEventsResponse};
use ecsdeploy::models::service::{
    CreateServiceRequest, CreateServiceResponse, DeleteServiceRequest, DeleteServiceResponse,
    DescribeServicesRequest, DescribeServicesResponse, Deployment, Service,
    UpdateServiceRequest, UpdateServiceResponse,
};
use ecsdeploy::models::task::{
    DescribeTasksRequest, DescribeTasksResponse, RunTaskRequest, RunTaskResponse, Task,
};
use ecsdeploy::models::task_definition::{
    DescribeTaskDefinitionRequest, DescribeTaskDefinitionResponse, ListTaskDefinitionsRequest,
    ListTaskDefinitionsResponse, RegisterTaskDefinitionRequest, RegisterTaskDefinitionResponse,
    TaskDefinition,
};
use ecsdeploy::platform::{AutoScalingApi, EcsApi, LogsApi, Platform};
use ecsdeploy::terminal::{Console, MemorySink, TerminalOptions};
use ecsdeploy::utils::SleepFn;

pub const CLUSTER: &str = "prod";
pub const SERVICE: &str = "web";

pub fn task_definition_arn(family: &str, revision: i64) -> String {
    format!(
        "arn:aws:ecs:us-east-1:123456789012:task-definition/{}:{}",
        family, revision
    )
}

/// A stable, active service running `web:<revision>`
pub fn stable_service(revision: i64) -> Service {
    Service {
        service_name: SERVICE.to_string(),
        cluster_arn: format!("arn:aws:ecs:us-east-1:123456789012:cluster/{}", CLUSTER),
        status: "ACTIVE".to_string(),
        task_definition: task_definition_arn("web", revision),
        desired_count: 2,
        running_count: 2,
        deployments: vec![Deployment {
            id: "ecs-svc/1".to_string(),
            status: "PRIMARY".to_string(),
            task_definition: task_definition_arn("web", revision),
            desired_count: 2,
            running_count: 2,
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// A service still rolling out a second deployment
pub fn unstable_service(revision: i64) -> Service {
    let mut service = stable_service(revision);
    service.running_count = 1;
    service.deployments.push(Deployment {
        id: "ecs-svc/0".to_string(),
        status: "ACTIVE".to_string(),
        task_definition: task_definition_arn("web", revision - 1),
        desired_count: 1,
        running_count: 1,
        ..Default::default()
    });
    service
}

/// How the listing fake hands out `next_token`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Offsets into the list, ending after the last page
    #[default]
    Advancing,
    /// The first page again, always with this token
    Stuck(String),
    /// The first page again, with a fresh token every time
    Endless,
}

/// Pops scripted responses in order, repeating the last one forever
#[derive(Default)]
pub struct Script<T: Clone> {
    responses: Mutex<VecDeque<T>>,
}

impl<T: Clone> Script<T> {
    pub fn set(&self, responses: Vec<T>) {
        *self.responses.lock().unwrap() = responses.into();
    }

    fn next(&self) -> Option<T> {
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        }
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub calls: Mutex<Vec<String>>,

    pub services: Script<DescribeServicesResponse>,
    pub tasks: Script<DescribeTasksResponse>,
    pub run_task_response: Mutex<RunTaskResponse>,
    pub current_task_definition: Mutex<Option<TaskDefinition>>,

    /// Task definition ARNs in descending order, served `page_size` at a time
    pub task_definition_arns: Mutex<Vec<String>>,
    pub page_size: Mutex<Option<usize>>,
    pub cursor: Mutex<Cursor>,
    pub list_requests: Mutex<Vec<ListTaskDefinitionsRequest>>,

    pub registered: Mutex<Vec<RegisterTaskDefinitionRequest>>,
    pub created: Mutex<Vec<CreateServiceRequest>>,
    pub updated: Mutex<Vec<UpdateServiceRequest>>,
    pub deleted: Mutex<Vec<DeleteServiceRequest>>,
    pub run_requests: Mutex<Vec<RunTaskRequest>>,

    pub log_events: Mutex<GetLogEventsResponse>,
    pub log_requests: Mutex<Vec<GetLogEventsRequest>>,

    pub scalable_targets: Mutex<Vec<ScalableTarget>>,
    pub target_updates: Mutex<Vec<RegisterScalableTargetRequest>>,
    pub failing_target: Mutex<Option<String>>,
    pub deny_autoscaling: Mutex<bool>,
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn platform(self: &Arc<Self>) -> Platform {
        Platform::new(self.clone(), self.clone(), self.clone())
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    /// Names of mutating calls, in order
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c.as_str(),
                    "RegisterTaskDefinition"
                        | "CreateService"
                        | "UpdateService"
                        | "DeleteService"
                        | "RunTask"
                        | "RegisterScalableTarget"
                )
            })
            .collect()
    }
}

#[async_trait]
impl EcsApi for FakePlatform {
    async fn describe_services(
        &self,
        _request: &DescribeServicesRequest,
    ) -> Result<DescribeServicesResponse, DeployError> {
        self.record("DescribeServices");
        Ok(self.services.next().unwrap_or_default())
    }

    async fn describe_tasks(
        &self,
        _request: &DescribeTasksRequest,
    ) -> Result<DescribeTasksResponse, DeployError> {
        self.record("DescribeTasks");
        Ok(self.tasks.next().unwrap_or_default())
    }

    async fn describe_task_definition(
        &self,
        request: &DescribeTaskDefinitionRequest,
    ) -> Result<DescribeTaskDefinitionResponse, DeployError> {
        self.record("DescribeTaskDefinition");
        match self.current_task_definition.lock().unwrap().clone() {
            Some(task_definition) => Ok(DescribeTaskDefinitionResponse { task_definition }),
            None => Err(DeployError::ApiError {
                code: "ClientException".to_string(),
                message: format!("Unable to describe task definition {}", request.task_definition),
            }),
        }
    }

    async fn list_task_definitions(
        &self,
        request: &ListTaskDefinitionsRequest,
    ) -> Result<ListTaskDefinitionsResponse, DeployError> {
        self.record("ListTaskDefinitions");
        self.list_requests.lock().unwrap().push(request.clone());

        let arns = self.task_definition_arns.lock().unwrap().clone();
        let page_size = self
            .page_size
            .lock()
            .unwrap()
            .unwrap_or(request.max_results as usize);
        let first_page = arns[..page_size.min(arns.len())].to_vec();
        match self.cursor.lock().unwrap().clone() {
            Cursor::Stuck(token) => {
                return Ok(ListTaskDefinitionsResponse {
                    task_definition_arns: first_page,
                    next_token: Some(token),
                });
            }
            Cursor::Endless => {
                let calls = self.list_requests.lock().unwrap().len();
                return Ok(ListTaskDefinitionsResponse {
                    task_definition_arns: first_page,
                    next_token: Some(format!("page-{}", calls)),
                });
            }
            Cursor::Advancing => {}
        }

        let start: usize = match &request.next_token {
            Some(token) => token.parse().unwrap(),
            None => 0,
        };
        let end = (start + page_size).min(arns.len());
        let page = arns.get(start..end).unwrap_or_default().to_vec();
        Ok(ListTaskDefinitionsResponse {
            task_definition_arns: page,
            next_token: (end < arns.len()).then(|| end.to_string()),
        })
    }

    async fn register_task_definition(
        &self,
        request: &RegisterTaskDefinitionRequest,
    ) -> Result<RegisterTaskDefinitionResponse, DeployError> {
        self.record("RegisterTaskDefinition");
        let mut registered = self.registered.lock().unwrap();
        registered.push(request.clone());
        let revision = registered.len() as i64;

        let mut task_definition: TaskDefinition =
            serde_json::from_value(serde_json::to_value(request).unwrap()).unwrap();
        task_definition.revision = Some(revision);
        task_definition.status = Some("ACTIVE".to_string());
        task_definition.task_definition_arn =
            Some(task_definition_arn(&request.family, revision));
        Ok(RegisterTaskDefinitionResponse { task_definition })
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskResponse, DeployError> {
        self.record("RunTask");
        self.run_requests.lock().unwrap().push(request.clone());
        Ok(self.run_task_response.lock().unwrap().clone())
    }

    async fn create_service(
        &self,
        request: &CreateServiceRequest,
    ) -> Result<CreateServiceResponse, DeployError> {
        self.record("CreateService");
        self.created.lock().unwrap().push(request.clone());
        Ok(CreateServiceResponse::default())
    }

    async fn update_service(
        &self,
        request: &UpdateServiceRequest,
    ) -> Result<UpdateServiceResponse, DeployError> {
        self.record("UpdateService");
        self.updated.lock().unwrap().push(request.clone());
        Ok(UpdateServiceResponse::default())
    }

    async fn delete_service(
        &self,
        request: &DeleteServiceRequest,
    ) -> Result<DeleteServiceResponse, DeployError> {
        self.record("DeleteService");
        self.deleted.lock().unwrap().push(request.clone());
        Ok(DeleteServiceResponse::default())
    }
}

#[async_trait]
impl LogsApi for FakePlatform {
    async fn get_log_events(
        &self,
        request: &GetLogEventsRequest,
    ) -> Result<GetLogEventsResponse, DeployError> {
        self.record("GetLogEvents");
        self.log_requests.lock().unwrap().push(request.clone());
        Ok(self.log_events.lock().unwrap().clone())
    }
}

#[async_trait]
impl AutoScalingApi for FakePlatform {
    async fn describe_scalable_targets(
        &self,
        _request: &DescribeScalableTargetsRequest,
    ) -> Result<DescribeScalableTargetsResponse, DeployError> {
        self.record("DescribeScalableTargets");
        if *self.deny_autoscaling.lock().unwrap() {
            return Err(DeployError::ApiError {
                code: "AccessDeniedException".to_string(),
                message: "not authorized".to_string(),
            });
        }
        Ok(DescribeScalableTargetsResponse {
            scalable_targets: self.scalable_targets.lock().unwrap().clone(),
            next_token: None,
        })
    }

    async fn register_scalable_target(
        &self,
        request: &RegisterScalableTargetRequest,
    ) -> Result<RegisterScalableTargetResponse, DeployError> {
        self.record("RegisterScalableTarget");
        if self.failing_target.lock().unwrap().as_deref() == Some(request.resource_id.as_str()) {
            return Err(DeployError::ApiError {
                code: "ValidationException".to_string(),
                message: "target is busy".to_string(),
            });
        }
        self.target_updates.lock().unwrap().push(request.clone());
        Ok(RegisterScalableTargetResponse::default())
    }

    async fn describe_scaling_policies(
        &self,
        _request: &DescribeScalingPoliciesRequest,
    ) -> Result<DescribeScalingPoliciesResponse, DeployError> {
        self.record("DescribeScalingPolicies");
        Ok(DescribeScalingPoliciesResponse::default())
    }
}

/// Sleep that returns immediately
pub fn instant_sleep() -> SleepFn {
    Arc::new(|_: Duration| -> BoxFuture<'static, ()> { Box::pin(async {}) })
}

/// Sleep that only yields to the scheduler
pub fn yielding_sleep() -> SleepFn {
    Arc::new(|_: Duration| -> BoxFuture<'static, ()> { Box::pin(tokio::task::yield_now()) })
}

pub fn memory_console(interactive: bool) -> (Console, MemorySink) {
    let sink = MemorySink::new();
    let options = TerminalOptions {
        width: 90,
        interactive,
    };
    (Console::with_sink(options, sink.clone()), sink)
}

pub fn describe_one(service: Service) -> DescribeServicesResponse {
    DescribeServicesResponse {
        services: vec![service],
        failures: vec![],
    }
}

pub fn stopped_task(arn: &str, exit_code: Option<i64>, reason: Option<&str>) -> Task {
    Task {
        task_arn: arn.to_string(),
        last_status: "STOPPED".to_string(),
        containers: vec![ecsdeploy::models::task::Container {
            name: "app".to_string(),
            exit_code,
            reason: reason.map(str::to_string),
            last_status: "STOPPED".to_string(),
        }],
        ..Default::default()
    }
}
