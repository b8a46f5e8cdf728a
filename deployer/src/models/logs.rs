//! Log service models

use serde::{Deserialize, Serialize};

/// A single log record, timestamps in epoch milliseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputLogEvent {
    #[serde(default)]
    pub timestamp: i64,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLogEventsRequest {
    pub log_group_name: String,
    pub log_stream_name: String,

    /// Epoch milliseconds
    pub start_time: i64,

    #[serde(default)]
    pub start_from_head: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLogEventsResponse {
    #[serde(default)]
    pub events: Vec<OutputLogEvent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_forward_token: Option<String>,
}
