use base64::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::adapters::publisher::TopicPublisher;
use crate::runtime::contract::{decode_message_value, encode_message};

/// Status returned when the broker could not be reached at all.
pub const BROKER_UNREACHABLE_STATUS: u16 = 502;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Relays one message from an API Gateway proxy event to `topic_arn`.
///
/// The response mirrors the broker: its status code and message id on
/// success, its status code (or 502 when it never answered) on failure.
pub fn handle_publish_event(
    event: Value,
    topic_arn: Option<&str>,
    publisher: &dyn TopicPublisher,
) -> ApiGatewayResponse {
    let payload = match normalize_apigw_event(event) {
        Ok(value) => value,
        Err(message) => return validation_error_response(&message),
    };

    let message = match decode_message_value(payload) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&format!("Malformed message: {error}")),
    };

    let topic_arn = match topic_arn {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            return error_response(
                500,
                json!({
                    "error": "misconfiguration",
                    "message": "TOPIC_ARN must be configured",
                }),
            );
        }
    };

    let encoded = match encode_message(&message) {
        Ok(value) => value,
        Err(error) => {
            return error_response(
                500,
                json!({
                    "error": "serialization_error",
                    "message": error.to_string(),
                }),
            );
        }
    };

    match publisher.publish(topic_arn, &encoded) {
        Ok(receipt) => {
            info!(
                message_id = %receipt.message_id,
                topic_arn = %topic_arn,
                status_code = receipt.status_code,
                "Published SNS message"
            );
            text_response(receipt.status_code, receipt.message_id)
        }
        Err(failure) => {
            let status_code = failure.status_code.unwrap_or(BROKER_UNREACHABLE_STATUS);
            error!(
                topic_arn = %topic_arn,
                status_code,
                error = %failure,
                "Failed to publish SNS message"
            );
            error_response(
                status_code,
                json!({
                    "error": "publish_failed",
                    "message": failure.message,
                }),
            )
        }
    }
}

fn normalize_apigw_event(event: Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Err("Request body is required".to_string()),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => {
            let is_base64 = object
                .get("isBase64Encoded")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let text = if is_base64 {
                decode_base64_body(text)?
            } else {
                text.clone()
            };
            serde_json::from_str(&text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        _ => Err("Request body must be a JSON object".to_string()),
    }
}

fn decode_base64_body(text: &str) -> Result<String, String> {
    let bytes = BASE64_STANDARD
        .decode(text)
        .map_err(|error| format!("Malformed base64 body: {error}"))?;
    String::from_utf8(bytes).map_err(|error| format!("Request body must be UTF-8: {error}"))
}

fn validation_error_response(message: &str) -> ApiGatewayResponse {
    error_response(
        400,
        json!({
            "error": "validation_error",
            "message": message,
        }),
    )
}

fn text_response(status_code: u16, body: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "text/plain; charset=utf-8"}),
        body,
    }
}

fn error_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: payload.to_string(),
    }
}
