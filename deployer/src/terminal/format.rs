//! Status line formatting
//!
//! Pure functions turning platform records into the lines shown to an
//! operator. None of them write anything; callers hand the lines to a
//! [`Console`](super::Console).

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::models::autoscaling::{ScalableTarget, ScalingPolicy};
use crate::models::logs::OutputLogEvent;
use crate::models::service::{Deployment, ServiceEvent, TaskSet};
use crate::utils::arn_to_name;

/// Indent used for records nested under a heading
pub const INDENT: &str = "  ";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Split `text` into chunks of at most `width` characters
///
/// Concatenating the chunks gives back `text` exactly. An empty input yields
/// a single empty line so a blank message still occupies one row.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn local_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// One deployment, e.g. `PRIMARY web:39 desired:2 pending:0 running:2 COMPLETED`
pub fn format_deployment(deployment: &Deployment) -> String {
    let mut line = format!(
        "{:>8} {} desired:{} pending:{} running:{}",
        deployment.status,
        arn_to_name(&deployment.task_definition),
        deployment.desired_count,
        deployment.pending_count,
        deployment.running_count,
    );
    if let Some(state) = &deployment.rollout_state {
        line.push(' ');
        line.push_str(state);
    }
    line
}

pub fn format_task_set(task_set: &TaskSet) -> String {
    format!(
        "{:>8} {} desired:{} pending:{} running:{} {}",
        task_set.status,
        arn_to_name(&task_set.task_definition),
        task_set.computed_desired_count,
        task_set.pending_count,
        task_set.running_count,
        task_set.stability_status,
    )
}

/// A service event, timestamped in local time and wrapped to `width`
pub fn format_event(event: &ServiceEvent, width: usize) -> Vec<String> {
    let line = match event.created_at {
        Some(at) => format!("{} {}", local_timestamp(at), event.message),
        None => event.message.clone(),
    };
    wrap(&line, width)
}

/// A log record; the timestamp is in epoch milliseconds
pub fn format_log_event(event: &OutputLogEvent, width: usize) -> Vec<String> {
    let line = match Utc.timestamp_millis_opt(event.timestamp).single() {
        Some(at) => format!("{} {}", local_timestamp(at), event.message),
        None => event.message.clone(),
    };
    wrap(&line, width)
}

/// Capacity bounds followed by the suspension flags
pub fn format_scalable_target(target: &ScalableTarget) -> Vec<String> {
    let suspended = target.suspended_state.unwrap_or_default();
    vec![
        format!(
            "{INDENT}Capacity min:{} max:{}",
            target.min_capacity, target.max_capacity
        ),
        format!(
            "{INDENT}Suspended in:{} out:{} scheduled:{}",
            suspended.dynamic_scaling_in_suspended,
            suspended.dynamic_scaling_out_suspended,
            suspended.scheduled_scaling_suspended,
        ),
    ]
}

pub fn format_scaling_policy(policy: &ScalingPolicy) -> String {
    format!(
        "{INDENT}Policy name:{} type:{}",
        policy.policy_name, policy.policy_type
    )
}

/// Events created strictly after `started_at`, newest first as the platform
/// returns them
pub fn events_since(events: &[ServiceEvent], started_at: DateTime<Utc>) -> Vec<&ServiceEvent> {
    events.iter().filter(|e| e.is_after(started_at)).collect()
}
