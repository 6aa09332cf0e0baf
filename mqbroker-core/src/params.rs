//! Caller-supplied parameter overrides.
//!
//! The lifecycle API hands the broker a raw JSON value. Decoding is an
//! explicit per-field affair: each known attribute must be a JSON string if
//! present, anything else is a validation error naming the offending field.
//! Unknown fields are ignored.

use mqbroker_models::QueueDetails;
use serde_json::{Map, Value};

use crate::errors::BrokerError;

/// Optional per-attribute overrides a caller may supply at provision or
/// update time. `None` and the empty string both mean "keep the plan
/// default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueParameters {
    pub delay_seconds: Option<String>,
    pub maximum_message_size: Option<String>,
    pub message_retention_period: Option<String>,
    pub policy: Option<String>,
    pub receive_message_wait_time_seconds: Option<String>,
    pub visibility_timeout: Option<String>,
}

impl QueueParameters {
    /// Decode overrides from the raw request value. Absent or null
    /// parameters decode to the empty override set.
    pub fn decode(raw: Option<&Value>) -> Result<Self, BrokerError> {
        let map = match raw {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(BrokerError::InvalidParameters {
                    field: "parameters".to_string(),
                })
            }
        };

        Ok(Self {
            delay_seconds: string_field(map, "delay_seconds")?,
            maximum_message_size: string_field(map, "maximum_message_size")?,
            message_retention_period: string_field(map, "message_retention_period")?,
            policy: string_field(map, "policy")?,
            receive_message_wait_time_seconds: string_field(
                map,
                "receive_message_wait_time_seconds",
            )?,
            visibility_timeout: string_field(map, "visibility_timeout")?,
        })
    }

    /// Overlay the overrides onto plan-derived details. A non-empty override
    /// replaces the plan value per field; everything else stays.
    pub fn apply(&self, details: &mut QueueDetails) {
        overlay(&mut details.delay_seconds, &self.delay_seconds);
        overlay(&mut details.maximum_message_size, &self.maximum_message_size);
        overlay(
            &mut details.message_retention_period,
            &self.message_retention_period,
        );
        overlay(&mut details.policy, &self.policy);
        overlay(
            &mut details.receive_message_wait_time_seconds,
            &self.receive_message_wait_time_seconds,
        );
        overlay(&mut details.visibility_timeout, &self.visibility_timeout);
    }
}

fn string_field(map: &Map<String, Value>, field: &str) -> Result<Option<String>, BrokerError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(BrokerError::InvalidParameters {
            field: field.to_string(),
        }),
    }
}

fn overlay(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *target = value.clone();
        }
    }
}
