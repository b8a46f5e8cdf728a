//! Per-command options

use std::path::PathBuf;

/// Status command options
#[derive(Debug, Clone)]
pub struct StatusOptions {
    /// Number of newest events to show
    pub events: usize,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self { events: 2 }
    }
}

/// Create command options
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub dry_run: bool,

    /// Overrides the service definition's desired count
    pub desired_count: Option<i64>,

    pub no_wait: bool,
}

/// Whether a deploy touches the service's autoscaling suspension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoScalingChange {
    #[default]
    Keep,
    Suspend,
    Resume,
}

/// Deploy command options
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub dry_run: bool,

    /// Overrides the service's desired count, kept as is when unset
    pub desired_count: Option<i64>,

    /// Reuse the service's current task definition instead of registering
    pub skip_task_definition: bool,

    pub force_new_deployment: bool,

    pub auto_scaling: AutoScalingChange,

    pub no_wait: bool,
}

/// Rollback command options
#[derive(Debug, Clone, Default)]
pub struct RollbackOptions {
    pub dry_run: bool,
    pub no_wait: bool,
}

/// Delete command options
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub dry_run: bool,

    /// Skip the typed confirmation
    pub force: bool,
}

/// Run command options
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dry_run: bool,

    /// Task definition file to run instead of the configured one
    pub task_definition: Option<PathBuf>,

    /// Run the service's current task definition without registering
    pub skip_task_definition: bool,

    /// Number of tasks to start
    pub count: i64,

    /// Task overrides, as JSON
    pub overrides: Option<String>,

    /// Container whose exit status decides success, the first one by default
    pub watch_container: Option<String>,

    pub no_wait: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            task_definition: None,
            skip_task_definition: false,
            count: 1,
            overrides: None,
            watch_container: None,
            no_wait: false,
        }
    }
}

/// Register command options
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    pub dry_run: bool,

    /// Print the registered definition as JSON
    pub output: bool,
}

/// Suffix appended to start banners of dry runs
pub fn dry_run_label(dry_run: bool) -> &'static str {
    if dry_run {
        "(dry run)"
    } else {
        ""
    }
}
