//! HTTP implementation of the platform facade

pub mod autoscaling;
pub mod client;
pub mod ecs;
pub mod logs;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::config::settings::Settings;
use crate::errors::DeployError;
use crate::http::autoscaling::AutoScalingClient;
use crate::http::client::HttpClient;
use crate::http::ecs::EcsClient;
use crate::http::logs::LogsClient;
use crate::platform::Platform;

/// Build HTTP-backed clients for every platform API
pub fn connect(settings: &Settings) -> Result<Platform, DeployError> {
    let token = || {
        settings
            .auth_token
            .as_ref()
            .map(|t| SecretString::from(t.expose_secret().to_owned()))
    };

    let ecs = HttpClient::new(settings.ecs_endpoint()?, ecs::TARGET_PREFIX, token())?;
    let logs = HttpClient::new(settings.logs_endpoint()?, logs::TARGET_PREFIX, token())?;
    let autoscaling = HttpClient::new(
        settings.autoscaling_endpoint()?,
        autoscaling::TARGET_PREFIX,
        token(),
    )?;

    Ok(Platform::new(
        Arc::new(EcsClient::new(ecs)),
        Arc::new(LogsClient::new(logs)),
        Arc::new(AutoScalingClient::new(autoscaling)),
    ))
}
