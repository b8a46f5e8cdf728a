//! Log service API client

use async_trait::async_trait;

use crate::errors::DeployError;
use crate::http::client::HttpClient;
use crate::models::logs::{GetLogEventsRequest, GetLogEventsResponse};
use crate::platform::LogsApi;

pub const TARGET_PREFIX: &str = "Logs_20140328";

pub struct LogsClient {
    http: HttpClient,
}

impl LogsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LogsApi for LogsClient {
    async fn get_log_events(
        &self,
        request: &GetLogEventsRequest,
    ) -> Result<GetLogEventsResponse, DeployError> {
        self.http.call("GetLogEvents", request).await
    }
}
