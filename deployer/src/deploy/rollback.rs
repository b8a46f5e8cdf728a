//! Rollback target resolution

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{DeployError, ResultExt};
use crate::models::task_definition::{ListTaskDefinitionsRequest, SortOrder};
use crate::platform::EcsApi;
use crate::utils::task_definition_family;

/// Page size used when listing a family's revisions
pub const PAGE_SIZE: i64 = 100;

/// Upper bound on pages scanned, in case the listing cursor never advances
pub const MAX_PAGES: usize = 10_000;

/// Find the revision registered immediately before `task_definition_arn`
///
/// Scans the family newest-first, page by page, and returns the first ARN
/// seen after the current one. Fails with `NotFound` when the current
/// revision is the oldest, is not listed at all, or the listing is exhausted.
pub async fn find_rollback_target(
    ecs: &dyn EcsApi,
    task_definition_arn: &str,
) -> Result<String, DeployError> {
    let family = task_definition_family(task_definition_arn);
    let mut request = ListTaskDefinitionsRequest {
        family_prefix: family.to_string(),
        sort: SortOrder::Desc,
        max_results: PAGE_SIZE,
        next_token: None,
    };
    let mut seen_tokens = HashSet::new();
    let mut found = false;

    for page in 1..=MAX_PAGES {
        let output = ecs
            .list_task_definitions(&request)
            .await
            .context("failed to list task definitions")?;
        debug!(
            "Rollback scan page {}: {} revisions of {}",
            page,
            output.task_definition_arns.len(),
            family
        );

        if output.task_definition_arns.is_empty() {
            break;
        }
        for arn in output.task_definition_arns {
            if found {
                return Ok(arn);
            }
            if arn == task_definition_arn {
                found = true;
            }
        }

        match output.next_token {
            Some(token) if seen_tokens.insert(token.clone()) => {
                request.next_token = Some(token);
            }
            Some(token) => {
                debug!("Listing returned token {} twice, stopping", token);
                break;
            }
            None => break,
        }
    }

    Err(DeployError::NotFound(format!(
        "rollback target of {} is not found",
        task_definition_arn
    )))
}
