//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::app::prompt::{Prompt, StdinPrompt};
use crate::config::settings::Settings;
use crate::deploy::waiter::{self, Waiter};
use crate::platform::Platform;
use crate::terminal::Console;
use crate::utils::{tokio_sleep, SleepFn};

/// The service a command operates on, and where its definitions live
#[derive(Debug, Clone)]
pub struct Target {
    pub cluster: String,
    pub service: String,
    pub task_definition: PathBuf,
    pub service_definition: Option<PathBuf>,
}

impl Target {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            cluster: settings.cluster.clone(),
            service: settings.service.clone(),
            task_definition: settings.task_definition.clone(),
            service_definition: settings.service_definition.clone(),
        }
    }
}

/// Everything a command needs, built once per invocation
#[derive(Clone)]
pub struct App {
    pub platform: Platform,
    pub target: Target,
    pub console: Console,
    pub wait_options: waiter::Options,
    pub sleep: SleepFn,
    pub prompt: Arc<dyn Prompt>,
    pub cancel: CancellationToken,
}

impl App {
    pub fn new(platform: Platform, target: Target, console: Console) -> Self {
        Self {
            platform,
            target,
            console,
            wait_options: waiter::Options::default(),
            sleep: tokio_sleep(),
            prompt: Arc::new(StdinPrompt),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_wait_options(mut self, options: waiter::Options) -> Self {
        self.wait_options = options;
        self
    }

    pub fn with_sleep(mut self, sleep: SleepFn) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn Prompt>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cluster(&self) -> &str {
        &self.target.cluster
    }

    pub fn service(&self) -> &str {
        &self.target.service
    }

    /// Waiter bound to this app's platform, console and cancellation token
    pub fn waiter(&self) -> Waiter {
        Waiter::new(
            self.platform.clone(),
            self.console.clone(),
            self.wait_options.clone(),
            self.sleep.clone(),
            self.cancel.clone(),
        )
    }
}
