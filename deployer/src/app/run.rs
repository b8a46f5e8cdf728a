//! Command dispatch

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::commands;
use crate::app::options::{
    CreateOptions, DeleteOptions, DeployOptions, RegisterOptions, RollbackOptions, RunOptions,
    StatusOptions,
};
use crate::app::state::App;
use crate::errors::DeployError;

/// A command to run against the configured service
#[derive(Debug, Clone)]
pub enum Command {
    Status(StatusOptions),
    Create(CreateOptions),
    Deploy(DeployOptions),
    Rollback(RollbackOptions),
    Delete(DeleteOptions),
    Run(RunOptions),
    Wait,
    Register(RegisterOptions),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Status(_) => "status",
            Command::Create(_) => "create",
            Command::Deploy(_) => "deploy",
            Command::Rollback(_) => "rollback",
            Command::Delete(_) => "delete",
            Command::Run(_) => "run",
            Command::Wait => "wait",
            Command::Register(_) => "register",
        }
    }
}

/// Run `command`, bounded by `timeout` and aborted by `shutdown_signal`
///
/// Both the timeout and the signal drop the command future, which cancels
/// any renderer it started.
pub async fn run(
    app: &App,
    command: Command,
    timeout: Option<Duration>,
    shutdown_signal: impl Future<Output = ()>,
) -> Result<(), DeployError> {
    let name = command.name();
    let result = tokio::select! {
        result = execute_with_timeout(app, command, timeout) => result,
        _ = shutdown_signal => {
            warn!("Interrupted, aborting {}...", name);
            Err(DeployError::Internal(format!("{} interrupted", name)))
        }
    };
    app.cancel.cancel();
    result
}

async fn execute_with_timeout(
    app: &App,
    command: Command,
    timeout: Option<Duration>,
) -> Result<(), DeployError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, execute(app, command))
            .await
            .map_err(|_| DeployError::Timeout(format!("command exceeded {:?}", limit)))?,
        None => execute(app, command).await,
    }
}

/// Run one command to completion
pub async fn execute(app: &App, command: Command) -> Result<(), DeployError> {
    info!("Running {} command", command.name());
    match command {
        Command::Status(options) => commands::status(app, &options).await,
        Command::Create(options) => commands::create(app, &options).await,
        Command::Deploy(options) => commands::deploy(app, &options).await,
        Command::Rollback(options) => commands::rollback(app, &options).await,
        Command::Delete(options) => commands::delete(app, &options).await,
        Command::Run(options) => commands::run(app, &options).await,
        Command::Wait => commands::wait(app).await,
        Command::Register(options) => commands::register(app, &options).await,
    }
}
