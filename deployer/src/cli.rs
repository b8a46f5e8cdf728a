use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use ecsdeploy::app::options::{
    AutoScalingChange, CreateOptions, DeleteOptions, DeployOptions, RegisterOptions,
    RollbackOptions, RunOptions, StatusOptions,
};
use ecsdeploy::app::run::Command;
use ecsdeploy::config::settings::DEFAULT_SETTINGS_FILE;

/// ecsdeploy - deploy a container service and follow it until it is stable
#[derive(Parser, Debug)]
#[command(name = "ecsdeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the settings file
    #[arg(long = "config", global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct DryRun {
    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the service status
    Status {
        /// Number of events to show
        #[arg(long, default_value = "2")]
        events: usize,
    },
    /// Create the service
    Create {
        #[command(flatten)]
        dry_run: DryRun,

        /// Desired count, overriding the service definition
        #[arg(long)]
        desired_count: Option<i64>,

        /// Exit right after the service is created
        #[arg(long)]
        no_wait: bool,
    },
    /// Deploy the task definition to the service
    Deploy {
        #[command(flatten)]
        dry_run: DryRun,

        /// Desired count, kept as is when unset
        #[arg(long)]
        desired_count: Option<i64>,

        /// Reuse the service's current task definition
        #[arg(long)]
        skip_task_definition: bool,

        /// Start a new deployment even if nothing changed
        #[arg(long)]
        force_new_deployment: bool,

        /// Suspend the service's autoscaling before updating it
        #[arg(long, conflicts_with = "resume_auto_scaling")]
        suspend_auto_scaling: bool,

        /// Resume the service's autoscaling before updating it
        #[arg(long)]
        resume_auto_scaling: bool,

        /// Exit right after the service is updated
        #[arg(long)]
        no_wait: bool,
    },
    /// Roll the service back to the previous task definition revision
    Rollback {
        #[command(flatten)]
        dry_run: DryRun,

        /// Exit right after the service is updated
        #[arg(long)]
        no_wait: bool,
    },
    /// Delete the service
    Delete {
        #[command(flatten)]
        dry_run: DryRun,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Run a one-off task
    Run {
        #[command(flatten)]
        dry_run: DryRun,

        /// Task definition file to run instead of the configured one
        #[arg(long = "task-def")]
        task_def: Option<PathBuf>,

        /// Run the service's current task definition
        #[arg(long)]
        skip_task_definition: bool,

        /// Number of tasks
        #[arg(long, default_value = "1")]
        count: i64,

        /// Task overrides as JSON
        #[arg(long)]
        overrides: Option<String>,

        /// Container whose exit status decides success
        #[arg(long)]
        watch_container: Option<String>,

        /// Exit right after the task is started
        #[arg(long)]
        no_wait: bool,
    },
    /// Wait until the service is stable
    Wait,
    /// Register the task definition
    Register {
        #[command(flatten)]
        dry_run: DryRun,

        /// Print the registered task definition
        #[arg(long)]
        output: bool,
    },
    /// Print version information
    Version,
}

impl Commands {
    /// The command to run, `None` for commands that need no settings
    pub fn into_command(self) -> Option<Command> {
        let command = match self {
            Commands::Status { events } => Command::Status(StatusOptions { events }),
            Commands::Create {
                dry_run,
                desired_count,
                no_wait,
            } => Command::Create(CreateOptions {
                dry_run: dry_run.dry_run,
                desired_count,
                no_wait,
            }),
            Commands::Deploy {
                dry_run,
                desired_count,
                skip_task_definition,
                force_new_deployment,
                suspend_auto_scaling,
                resume_auto_scaling,
                no_wait,
            } => Command::Deploy(DeployOptions {
                dry_run: dry_run.dry_run,
                desired_count,
                skip_task_definition,
                force_new_deployment,
                auto_scaling: match (suspend_auto_scaling, resume_auto_scaling) {
                    (true, _) => AutoScalingChange::Suspend,
                    (_, true) => AutoScalingChange::Resume,
                    _ => AutoScalingChange::Keep,
                },
                no_wait,
            }),
            Commands::Rollback { dry_run, no_wait } => Command::Rollback(RollbackOptions {
                dry_run: dry_run.dry_run,
                no_wait,
            }),
            Commands::Delete { dry_run, force } => Command::Delete(DeleteOptions {
                dry_run: dry_run.dry_run,
                force,
            }),
            Commands::Run {
                dry_run,
                task_def,
                skip_task_definition,
                count,
                overrides,
                watch_container,
                no_wait,
            } => Command::Run(RunOptions {
                dry_run: dry_run.dry_run,
                task_definition: task_def,
                skip_task_definition,
                count,
                overrides,
                watch_container,
                no_wait,
            }),
            Commands::Wait => Command::Wait,
            Commands::Register { dry_run, output } => Command::Register(RegisterOptions {
                dry_run: dry_run.dry_run,
                output,
            }),
            Commands::Version => return None,
        };
        Some(command)
    }
}
