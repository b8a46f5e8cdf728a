//! ecsdeploy - Entry Point
//!
//! Deploys a single container service and follows it until it converges.

mod cli;

use std::io::IsTerminal;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing::{info, info_span, warn, Instrument};

use ecsdeploy::app::run::run;
use ecsdeploy::app::state::{App, Target};
use ecsdeploy::config::settings::Settings;
use ecsdeploy::deploy::waiter;
use ecsdeploy::http;
use ecsdeploy::logs::{init_logging, LogLevel, LogOptions};
use ecsdeploy::terminal::{Console, TerminalOptions};
use ecsdeploy::utils::version_info;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    if let Err(e) = execute().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn execute() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Print version and exit
    let Some(command) = cli.command.into_command() else {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(());
    };

    let settings = Settings::load(&cli.config)
        .await
        .with_context(|| format!("failed to load settings {}", cli.config.display()))?;

    let log_options = LogOptions {
        log_level: if cli.debug {
            LogLevel::Debug
        } else {
            settings.log_level
        },
        ansi: std::io::stdout().is_terminal(),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        println!("Failed to initialize logging: {e}");
    }

    let platform = http::connect(&settings).context("failed to set up platform clients")?;
    let console = Console::stdout(TerminalOptions::detect(settings.terminal_width));
    let defaults = waiter::Options::default();
    let app = App::new(platform, Target::from_settings(&settings), console).with_wait_options(
        waiter::Options {
            timeout: settings.timeout().unwrap_or(defaults.timeout),
            ..defaults
        },
    );

    let span = info_span!(
        "ecsdeploy",
        service = %settings.service,
        cluster = %settings.cluster
    );
    run(&app, command, settings.timeout(), await_shutdown_signal())
        .instrument(span)
        .await?;
    Ok(())
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        info!("SIGTERM received, aborting...");
                    }
                    _ = await_ctrl_c() => {
                        info!("Ctrl+C received, aborting...");
                    }
                }
            }
            Err(e) => {
                warn!("Unable to listen for SIGTERM: {}", e);
                await_ctrl_c().await;
                info!("Ctrl+C received, aborting...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        await_ctrl_c().await;
        info!("Ctrl+C received, aborting...");
    }
}

async fn await_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
