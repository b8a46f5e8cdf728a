//! HTTP client implementation
//!
//! The platform APIs speak a JSON-over-POST protocol: every operation is a
//! `POST /` whose `X-Amz-Target` header names the operation.

use std::time::Duration;

use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::errors::DeployError;

const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_HEADER: &str = "X-Amz-Target";

/// HTTP client bound to one platform API
pub struct HttpClient {
    client: Client,
    endpoint: Url,
    target_prefix: &'static str,
    auth_token: Option<SecretString>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(
        endpoint: Url,
        target_prefix: &'static str,
        auth_token: Option<SecretString>,
    ) -> Result<Self, DeployError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("ecsdeploy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            target_prefix,
            auth_token,
        })
    }

    /// Invoke one operation
    pub async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<T, DeployError> {
        let target = format!("{}.{}", self.target_prefix, operation);
        trace!("POST {} {}", self.endpoint, target);

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(TARGET_HEADER, &target)
            .body(serde_json::to_vec(body)?);

        if let Some(token) = &self.auth_token {
            request = request.header(
                header::AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            );
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // surfaced by callers, renderer ticks stay silent at info
            debug!("{} failed: {} - {}", target, status, body);
            return Err(parse_api_error(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            serde_json::from_slice(b"{}")?
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(body)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", default)]
    error_type: Option<String>,

    #[serde(alias = "Message", default)]
    message: Option<String>,
}

/// Turn a platform error body into an `ApiError`
///
/// Error codes arrive namespaced (`com.amazonaws.ecs#ServiceNotFoundException`);
/// only the part after `#` is kept.
pub fn parse_api_error(status: u16, body: &str) -> DeployError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let (code, message) = match parsed {
        Some(ErrorBody {
            error_type: Some(error_type),
            message,
        }) => {
            let code = error_type
                .rsplit_once('#')
                .map(|(_, code)| code)
                .unwrap_or(&error_type)
                .to_string();
            (code, message.unwrap_or_default())
        }
        _ => (format!("HTTP {}", status), body.to_string()),
    };
    DeployError::ApiError { code, message }
}
