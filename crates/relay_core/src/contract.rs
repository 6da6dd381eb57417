use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Simulated workload applied when a message carries no usable duration.
pub const DEFAULT_DURATION_SECONDS: u64 = 1;

/// The payload relayed from the HTTP endpoint, through the topic, to the
/// queue consumer.
///
/// Both sides encode and decode through this one type so the field names
/// (`text`, `durationSeconds`) and their optionality cannot drift apart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelayMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

impl RelayMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            duration_seconds: None,
        }
    }

    pub fn with_duration_seconds(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Resolves how long the consumer should block for this message.
    ///
    /// Negative, non-finite and overflowing durations fall back to
    /// [`DEFAULT_DURATION_SECONDS`], same as an absent one.
    pub fn effective_duration(&self) -> Duration {
        self.duration_seconds
            .filter(|seconds| *seconds >= 0.0)
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            .unwrap_or(Duration::from_secs(DEFAULT_DURATION_SECONDS))
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode relay message: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed relay message JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("relay message must be a JSON object")]
    NotAnObject,
    #[error("relay message does not match schema: {0}")]
    Schema(#[source] serde_json::Error),
}

pub fn encode_message(message: &RelayMessage) -> Result<String, CodecError> {
    serde_json::to_string(message).map_err(CodecError::Encode)
}

pub fn decode_message(text: &str) -> Result<RelayMessage, CodecError> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::Syntax)?;
    decode_message_value(value)
}

pub fn decode_message_value(value: Value) -> Result<RelayMessage, CodecError> {
    if !value.is_object() {
        return Err(CodecError::NotAnObject);
    }
    serde_json::from_value(value).map_err(CodecError::Schema)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_duration_resolves_to_default() {
        let message = decode_message(r#"{"text":"hello"}"#).expect("message should decode");

        assert_eq!(message.duration_seconds, None);
        assert_eq!(message.effective_duration(), Duration::from_secs(1));
    }

    #[test]
    fn null_duration_is_treated_as_absent() {
        let message = decode_message(r#"{"text":"hello","durationSeconds":null}"#)
            .expect("message should decode");

        assert_eq!(message.effective_duration(), Duration::from_secs(1));
    }

    #[test]
    fn explicit_duration_is_used_verbatim() {
        let message = RelayMessage::new("x").with_duration_seconds(2.5);
        assert_eq!(message.effective_duration(), Duration::from_millis(2_500));

        let zero = RelayMessage::new("x").with_duration_seconds(0.0);
        assert_eq!(zero.effective_duration(), Duration::ZERO);
    }

    #[test]
    fn invalid_durations_fall_back_to_default() {
        for seconds in [-1.0, f64::NAN, f64::INFINITY, f64::MAX] {
            let message = RelayMessage::new("x").with_duration_seconds(seconds);
            assert_eq!(
                message.effective_duration(),
                Duration::from_secs(DEFAULT_DURATION_SECONDS),
                "duration {seconds} should fall back"
            );
        }
    }

    #[test]
    fn encoding_uses_wire_field_names_and_omits_absent_fields() {
        let encoded = encode_message(&RelayMessage::new("hello").with_duration_seconds(2.0))
            .expect("message should encode");
        let value: Value = serde_json::from_str(&encoded).expect("encoded text is JSON");
        assert_eq!(value, json!({"text": "hello", "durationSeconds": 2.0}));

        let bare = encode_message(&RelayMessage::default()).expect("message should encode");
        assert_eq!(bare, "{}");
    }

    #[test]
    fn integer_durations_decode_as_seconds() {
        let message = decode_message(r#"{"text":"hello","durationSeconds":2}"#)
            .expect("message should decode");
        assert_eq!(message, RelayMessage::new("hello").with_duration_seconds(2.0));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let message = decode_message(r#"{"text":"hello","traceId":"abc"}"#)
            .expect("message should decode");
        assert_eq!(message.text_or_empty(), "hello");
    }

    #[test]
    fn rejects_non_object_payloads() {
        let error = decode_message(r#"["hello", 2]"#).expect_err("array should fail");
        assert!(matches!(error, CodecError::NotAnObject));

        let error = decode_message("not json").expect_err("garbage should fail");
        assert!(matches!(error, CodecError::Syntax(_)));
    }

    #[test]
    fn rejects_mistyped_fields() {
        let error = decode_message(r#"{"text":"hello","durationSeconds":"two"}"#)
            .expect_err("string duration should fail");
        assert!(matches!(error, CodecError::Schema(_)));
        assert!(error.to_string().contains("does not match schema"));
    }

    #[test]
    fn missing_text_reads_as_empty() {
        let message = decode_message("{}").expect("empty object should decode");
        assert_eq!(message.text_or_empty(), "");
    }
}
