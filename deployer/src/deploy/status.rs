//! Service status report

use tracing::debug;

use crate::errors::{DeployError, ResultExt};
use crate::models::autoscaling::{
    service_resource_id, DescribeScalableTargetsRequest, DescribeScalingPoliciesRequest,
    DESIRED_COUNT_DIMENSION, ECS_SERVICE_NAMESPACE,
};
use crate::models::service::{DescribeServicesRequest, Service};
use crate::platform::{AutoScalingApi, EcsApi, Platform};
use crate::terminal::format::{
    format_deployment, format_event, format_scalable_target, format_scaling_policy,
    format_task_set, INDENT,
};
use crate::terminal::Console;
use crate::utils::arn_to_name;

/// Fetch one service, failing with `NotFound` when the platform has none
pub async fn describe_service(
    ecs: &dyn EcsApi,
    cluster: &str,
    service: &str,
) -> Result<Service, DeployError> {
    let output = ecs
        .describe_services(&DescribeServicesRequest {
            cluster: cluster.to_string(),
            services: vec![service.to_string()],
        })
        .await
        .context("failed to describe service")?;

    output
        .services
        .into_iter()
        .next()
        .ok_or_else(|| DeployError::NotFound(format!("service {} is not found", service)))
}

/// Print the status block of a service and return the described record
///
/// At most `events` of the newest events are shown.
pub async fn print_service_status(
    platform: &Platform,
    console: &Console,
    cluster: &str,
    service: &str,
    events: usize,
) -> Result<Service, DeployError> {
    let described = describe_service(platform.ecs.as_ref(), cluster, service).await?;

    console.println(format!("Service: {}", described.service_name));
    console.println(format!("Cluster: {}", arn_to_name(&described.cluster_arn)));
    console.println(format!(
        "TaskDefinition: {}",
        arn_to_name(&described.task_definition)
    ));
    if !described.deployments.is_empty() {
        console.println("Deployments:");
        console.print_lines(
            described
                .deployments
                .iter()
                .map(|d| format!("{INDENT}{}", format_deployment(d))),
        );
    }
    if !described.task_sets.is_empty() {
        console.println("TaskSets:");
        console.print_lines(
            described
                .task_sets
                .iter()
                .map(|ts| format!("{INDENT}{}", format_task_set(ts))),
        );
    }

    print_auto_scaling(platform.autoscaling.as_ref(), console, &described)
        .await
        .context("failed to describe autoscaling")?;

    console.println("Events:");
    for event in described.events.iter().take(events) {
        console.print_lines(format_event(event, console.width()));
    }
    Ok(described)
}

async fn print_auto_scaling(
    autoscaling: &dyn AutoScalingApi,
    console: &Console,
    service: &Service,
) -> Result<(), DeployError> {
    let cluster = arn_to_name(&service.cluster_arn);
    let targets = match autoscaling
        .describe_scalable_targets(&DescribeScalableTargetsRequest::for_service(
            cluster,
            &service.service_name,
        ))
        .await
    {
        Ok(output) => output.scalable_targets,
        Err(e) if e.is_access_denied() => {
            debug!(
                "unable to describe scalable targets. requires IAM for \
                 application-autoscaling:Describe* to display informations about auto-scaling."
            );
            return Ok(());
        }
        Err(e) => return Err(e.wrap("failed to describe scalable targets")),
    };
    if targets.is_empty() {
        return Ok(());
    }

    console.println("AutoScaling:");
    for target in &targets {
        console.print_lines(format_scalable_target(target));
    }

    let policies = autoscaling
        .describe_scaling_policies(&DescribeScalingPoliciesRequest {
            service_namespace: ECS_SERVICE_NAMESPACE.to_string(),
            resource_id: service_resource_id(cluster, &service.service_name),
            scalable_dimension: DESIRED_COUNT_DIMENSION.to_string(),
        })
        .await
        .context("failed to describe scaling policies")?;
    console.print_lines(policies.scaling_policies.iter().map(format_scaling_policy));
    Ok(())
}
