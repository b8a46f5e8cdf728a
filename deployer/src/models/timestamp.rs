//! Serde helpers for platform timestamps
//!
//! The control plane encodes timestamps as fractional epoch seconds.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

fn from_epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1_000_000_000.0).round() as u32;
    Utc.timestamp_opt(whole as i64, nanos.min(999_999_999)).single()
}

fn to_epoch_seconds(value: &DateTime<Utc>) -> f64 {
    value.timestamp() as f64 + f64::from(value.timestamp_subsec_millis()) / 1000.0
}

pub mod epoch_seconds_opt {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_f64(to_epoch_seconds(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<f64>::deserialize(deserializer)?;
        match secs {
            Some(secs) => from_epoch_seconds(secs)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {secs}"))),
            None => Ok(None),
        }
    }
}
