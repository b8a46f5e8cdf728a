//! Command flows
//!
//! Each command composes the deployment operations against one service and
//! reports progress through the console and the log.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::app::options::{
    dry_run_label, AutoScalingChange, CreateOptions, DeleteOptions, DeployOptions,
    RegisterOptions, RollbackOptions, RunOptions, StatusOptions,
};
use crate::app::state::App;
use crate::config::definitions::{load_service_definition, load_task_definition};
use crate::deploy::autoscaling::suspend_auto_scaling;
use crate::deploy::register::register_task_definition;
use crate::deploy::rollback::find_rollback_target;
use crate::deploy::status::{describe_service, print_service_status};
use crate::deploy::task::{describe_task_status, run_task, run_task_request};
use crate::errors::{DeployError, ResultExt};
use crate::models::service::{DeleteServiceRequest, UpdateServiceRequest};
use crate::models::task::TaskOverride;
use crate::models::task_definition::{DescribeTaskDefinitionRequest, TaskDefinition};
use crate::utils::arn_to_name;

const DRY_RUN_OK: &str = "DRY RUN OK";

fn to_json<T: Serialize>(value: &T) -> Result<String, DeployError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn registered_arn(task_definition: &TaskDefinition) -> Result<String, DeployError> {
    task_definition.task_definition_arn.clone().ok_or_else(|| {
        DeployError::Internal(format!(
            "task definition {} has no ARN",
            task_definition.name()
        ))
    })
}

/// Print the service status block
pub async fn status(app: &App, options: &StatusOptions) -> Result<(), DeployError> {
    print_service_status(
        &app.platform,
        &app.console,
        app.cluster(),
        app.service(),
        options.events,
    )
    .await?;
    Ok(())
}

/// Create the service from its definition files
pub async fn create(app: &App, options: &CreateOptions) -> Result<(), DeployError> {
    info!("Starting create service {}", dry_run_label(options.dry_run));

    let mut definition = load_service_definition(
        app.target.service_definition.as_deref(),
        app.cluster(),
        app.service(),
    )
    .await
    .context("failed to load service definition")?;
    let task_definition = load_task_definition(&app.target.task_definition)
        .await
        .context("failed to load task definition")?;

    if let Some(count) = options.desired_count {
        definition.desired_count = Some(count);
    }

    if options.dry_run {
        info!("task definition: {}", to_json(&task_definition)?);
        info!("service definition: {}", to_json(&definition)?);
        info!("{}", DRY_RUN_OK);
        return Ok(());
    }

    let registered = register_task_definition(app.platform.ecs.as_ref(), &task_definition)
        .await
        .context("failed to register task definition")?;
    definition.task_definition = Some(registered_arn(&registered)?);

    app.platform
        .ecs
        .create_service(&definition)
        .await
        .context("failed to create service")?;
    info!("Service is created");

    if options.no_wait {
        return Ok(());
    }

    let started_at = Utc::now();
    (app.sleep)(app.wait_options.service_changed_delay).await;
    app.waiter()
        .wait_service_stable(app.cluster(), app.service(), started_at)
        .await
        .context("failed to wait service stable")?;

    info!("Service is stable now. Completed!");
    Ok(())
}

/// Roll a new task definition (or a forced redeploy) out to the service
pub async fn deploy(app: &App, options: &DeployOptions) -> Result<(), DeployError> {
    info!("Starting deploy {}", dry_run_label(options.dry_run));

    let service = describe_service(app.platform.ecs.as_ref(), app.cluster(), app.service())
        .await
        .context("failed to describe current service status")?;

    let task_definition = if options.skip_task_definition {
        None
    } else {
        Some(
            load_task_definition(&app.target.task_definition)
                .await
                .context("failed to load task definition")?,
        )
    };

    if options.dry_run {
        match &task_definition {
            Some(td) => info!("task definition: {}", to_json(td)?),
            None => info!("task definition: {}", arn_to_name(&service.task_definition)),
        }
        if let Some(count) = options.desired_count {
            info!("desired count: {}", count);
        }
        info!("{}", DRY_RUN_OK);
        return Ok(());
    }

    let task_definition_arn = match &task_definition {
        Some(td) => {
            let registered = register_task_definition(app.platform.ecs.as_ref(), td)
                .await
                .context("failed to register task definition")?;
            registered_arn(&registered)?
        }
        None => service.task_definition.clone(),
    };

    let suspend = match options.auto_scaling {
        AutoScalingChange::Keep => None,
        AutoScalingChange::Suspend => Some(true),
        AutoScalingChange::Resume => Some(false),
    };
    if let Some(suspend) = suspend {
        suspend_auto_scaling(
            app.platform.autoscaling.as_ref(),
            app.cluster(),
            app.service(),
            suspend,
        )
        .await?;
    }

    update_service(
        app,
        UpdateServiceRequest {
            cluster: app.cluster().to_string(),
            service: app.service().to_string(),
            task_definition: Some(task_definition_arn),
            desired_count: options.desired_count,
            force_new_deployment: options.force_new_deployment,
        },
        options.no_wait,
    )
    .await
}

/// Point the service back at the revision before its current one
pub async fn rollback(app: &App, options: &RollbackOptions) -> Result<(), DeployError> {
    info!("Starting rollback {}", dry_run_label(options.dry_run));

    let service = describe_service(app.platform.ecs.as_ref(), app.cluster(), app.service())
        .await
        .context("failed to describe current service status")?;
    let target = find_rollback_target(app.platform.ecs.as_ref(), &service.task_definition)
        .await
        .context("failed to find rollback target")?;
    info!("Rolling back to {}", arn_to_name(&target));

    if options.dry_run {
        info!("{}", DRY_RUN_OK);
        return Ok(());
    }

    update_service(
        app,
        UpdateServiceRequest {
            cluster: app.cluster().to_string(),
            service: app.service().to_string(),
            task_definition: Some(target),
            desired_count: None,
            force_new_deployment: false,
        },
        options.no_wait,
    )
    .await
}

async fn update_service(
    app: &App,
    request: UpdateServiceRequest,
    no_wait: bool,
) -> Result<(), DeployError> {
    info!("Updating service...");
    app.platform
        .ecs
        .update_service(&request)
        .await
        .context("failed to update service")?;
    info!("Service is updated");

    if no_wait {
        return Ok(());
    }

    let started_at = Utc::now();
    (app.sleep)(app.wait_options.service_changed_delay).await;
    app.waiter()
        .wait_service_stable(app.cluster(), app.service(), started_at)
        .await
        .context("failed to wait service stable")?;

    info!("Service is stable now. Completed!");
    Ok(())
}

/// Delete the service after a typed confirmation
pub async fn delete(app: &App, options: &DeleteOptions) -> Result<(), DeployError> {
    info!("Deleting service {}", dry_run_label(options.dry_run));

    let service = print_service_status(&app.platform, &app.console, app.cluster(), app.service(), 3)
        .await?;

    if options.dry_run {
        info!("{}", DRY_RUN_OK);
        return Ok(());
    }

    if !options.force {
        let answer = app.prompt.ask("Enter the service name to DELETE").await?;
        if answer != service.service_name {
            info!("Aborted");
            return Err(DeployError::ConfirmationFailed(format!(
                "entered {:?} does not match {}",
                answer, service.service_name
            )));
        }
    }

    app.platform
        .ecs
        .delete_service(&DeleteServiceRequest {
            cluster: app.cluster().to_string(),
            service: service.service_name.clone(),
        })
        .await
        .context("failed to delete service")?;
    info!("Service is deleted");
    Ok(())
}

/// Run a one-off task with the service's network and placement setup
pub async fn run(app: &App, options: &RunOptions) -> Result<(), DeployError> {
    info!("Running task {}", dry_run_label(options.dry_run));

    let overrides = match options.overrides.as_deref() {
        Some(raw) if !raw.trim().is_empty() => Some(
            serde_json::from_str::<TaskOverride>(raw).context("invalid overrides")?,
        ),
        _ => None,
    };

    let service = print_service_status(&app.platform, &app.console, app.cluster(), app.service(), 0)
        .await
        .context("failed to describe service status")?;

    let task_definition = if options.skip_task_definition {
        let output = app
            .platform
            .ecs
            .describe_task_definition(&DescribeTaskDefinitionRequest {
                task_definition: service.task_definition.clone(),
            })
            .await
            .context("failed to describe task definition")?;
        if options.dry_run {
            info!("task definition: {}", to_json(&output.task_definition)?);
            info!("{}", DRY_RUN_OK);
            return Ok(());
        }
        output.task_definition
    } else {
        let path = options
            .task_definition
            .as_deref()
            .unwrap_or(app.target.task_definition.as_path());
        let loaded = load_task_definition(path)
            .await
            .context("failed to load task definition")?;
        if options.dry_run {
            info!("task definition: {}", to_json(&loaded)?);
            info!("{}", DRY_RUN_OK);
            return Ok(());
        }
        register_task_definition(app.platform.ecs.as_ref(), &loaded)
            .await
            .context("failed to register task definition")?
    };

    let request = run_task_request(
        app.cluster(),
        &registered_arn(&task_definition)?,
        &service,
        overrides,
        options.count,
    );
    let started_at = Utc::now();
    let task = run_task(app.platform.ecs.as_ref(), &request)
        .await
        .context("failed to run task")?;

    if options.no_wait {
        info!("Run task invoked");
        return Ok(());
    }

    app.waiter()
        .wait_task_stopped(app.cluster(), &task, &task_definition, started_at)
        .await
        .context("failed to run task")?;
    describe_task_status(
        app.platform.ecs.as_ref(),
        app.cluster(),
        &task,
        options.watch_container.as_deref(),
    )
    .await?;

    info!("Run task completed!");
    Ok(())
}

/// Wait for the service to become stable
pub async fn wait(app: &App) -> Result<(), DeployError> {
    info!("Waiting for the service stable");

    app.waiter()
        .wait_service_stable(app.cluster(), app.service(), Utc::now())
        .await?;

    info!("Service is stable now. Completed!");
    Ok(())
}

/// Register the configured task definition
pub async fn register(app: &App, options: &RegisterOptions) -> Result<(), DeployError> {
    info!(
        "Starting register task definition {}",
        dry_run_label(options.dry_run)
    );

    let task_definition = load_task_definition(&app.target.task_definition)
        .await
        .context("failed to load task definition")?;

    if options.dry_run {
        info!("task definition: {}", to_json(&task_definition)?);
        info!("{}", DRY_RUN_OK);
        return Ok(());
    }

    let registered = register_task_definition(app.platform.ecs.as_ref(), &task_definition)
        .await
        .context("failed to register task definition")?;
    if options.output {
        app.console.println(to_json(&registered)?);
    }
    Ok(())
}
