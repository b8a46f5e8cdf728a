//! Autoscaling suspension toggle

use tracing::info;

use crate::errors::{DeployError, ResultExt};
use crate::models::autoscaling::{
    service_resource_id, DescribeScalableTargetsRequest, RegisterScalableTargetRequest,
    SuspendedState,
};
use crate::platform::AutoScalingApi;

/// Set all suspension flags of the service's scalable targets to `suspend`
///
/// Returns how many targets were updated. Targets are updated one by one; a
/// failure stops the loop without reverting targets already updated.
pub async fn suspend_auto_scaling(
    autoscaling: &dyn AutoScalingApi,
    cluster: &str,
    service: &str,
    suspend: bool,
) -> Result<usize, DeployError> {
    let resource_id = service_resource_id(cluster, service);
    let output = autoscaling
        .describe_scalable_targets(&DescribeScalableTargetsRequest::for_service(
            cluster, service,
        ))
        .await
        .context("failed to describe scalable targets")?;

    if output.scalable_targets.is_empty() {
        info!("No scalable target for {}", resource_id);
        return Ok(0);
    }

    let mut updated = 0;
    for target in output.scalable_targets {
        info!(
            "Register scalable target {} set suspend to {}",
            target.resource_id, suspend
        );
        let request = RegisterScalableTargetRequest {
            service_namespace: target.service_namespace,
            resource_id: target.resource_id,
            scalable_dimension: target.scalable_dimension,
            suspended_state: SuspendedState::all(suspend),
        };
        autoscaling
            .register_scalable_target(&request)
            .await
            .with_context(|| {
                format!(
                    "failed to register scalable target {} set suspend to {}",
                    request.resource_id, suspend
                )
            })?;
        updated += 1;
    }
    Ok(updated)
}
