//! Unwrapping of the notification document SNS wraps around a message when
//! the queue subscription does not use raw message delivery.

use std::borrow::Cow;

use serde::Deserialize;

const NOTIFICATION_TYPE: &str = "Notification";

#[derive(Debug, Deserialize)]
struct SnsNotification {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Message")]
    message: String,
}

/// Returns the inner message when `body` is an SNS notification, otherwise
/// the body unchanged.
pub fn unwrap_notification(body: &str) -> Cow<'_, str> {
    match serde_json::from_str::<SnsNotification>(body) {
        Ok(notification) if notification.kind == NOTIFICATION_TYPE => {
            Cow::Owned(notification.message)
        }
        _ => Cow::Borrowed(body),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unwraps_notification_message() {
        let body = json!({
            "Type": "Notification",
            "MessageId": "5f0d",
            "TopicArn": "arn:aws:sns:us-east-1:123456789012:relay",
            "Message": "{\"text\":\"hello\"}",
        })
        .to_string();

        assert_eq!(unwrap_notification(&body), r#"{"text":"hello"}"#);
    }

    #[test]
    fn leaves_raw_bodies_untouched() {
        let body = r#"{"text":"hello","durationSeconds":0}"#;
        assert!(matches!(unwrap_notification(body), Cow::Borrowed(_)));
        assert!(matches!(unwrap_notification("not json"), Cow::Borrowed(_)));
    }

    #[test]
    fn ignores_other_sns_document_types() {
        let body = json!({
            "Type": "SubscriptionConfirmation",
            "Message": "You have chosen to subscribe",
        })
        .to_string();

        assert_eq!(unwrap_notification(&body), body.as_str());
    }
}
