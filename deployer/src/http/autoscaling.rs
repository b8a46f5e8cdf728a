//! Application autoscaling API client

use async_trait::async_trait;

use crate::errors::DeployError;
use crate::http::client::HttpClient;
use crate::models::autoscaling::{
    DescribeScalableTargetsRequest, DescribeScalableTargetsResponse,
    DescribeScalingPoliciesRequest, DescribeScalingPoliciesResponse,
    RegisterScalableTargetRequest, RegisterScalableTargetResponse,
};
use crate::platform::AutoScalingApi;

pub const TARGET_PREFIX: &str = "AnyScaleFrontendService";

pub struct AutoScalingClient {
    http: HttpClient,
}

impl AutoScalingClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AutoScalingApi for AutoScalingClient {
    async fn describe_scalable_targets(
        &self,
        request: &DescribeScalableTargetsRequest,
    ) -> Result<DescribeScalableTargetsResponse, DeployError> {
        self.http.call("DescribeScalableTargets", request).await
    }

    async fn register_scalable_target(
        &self,
        request: &RegisterScalableTargetRequest,
    ) -> Result<RegisterScalableTargetResponse, DeployError> {
        self.http.call("RegisterScalableTarget", request).await
    }

    async fn describe_scaling_policies(
        &self,
        request: &DescribeScalingPoliciesRequest,
    ) -> Result<DescribeScalingPoliciesResponse, DeployError> {
        self.http.call("DescribeScalingPolicies", request).await
    }
}
