use std::sync::{Arc, Mutex};

use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::context::BeforeDeserializationInterceptorContextRef;
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::config_bag::ConfigBag;
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::adapters::publisher::{PublishFailure, PublishReceipt, TopicPublisher};

/// Used only if the SDK reports success without the response having passed
/// through [`ResponseStatusRecorder`].
const FALLBACK_SUCCESS_STATUS: u16 = 200;

pub struct SnsTopicPublisher {
    sns_client: aws_sdk_sns::Client,
}

impl SnsTopicPublisher {
    pub fn new(sns_client: aws_sdk_sns::Client) -> Self {
        Self { sns_client }
    }
}

impl TopicPublisher for SnsTopicPublisher {
    fn publish(&self, topic_arn: &str, message: &str) -> Result<PublishReceipt, PublishFailure> {
        let client = self.sns_client.clone();
        let topic_arn = topic_arn.to_string();
        let message = message.to_string();
        let recorder = ResponseStatusRecorder::default();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .publish()
                    .topic_arn(topic_arn)
                    .message(message)
                    .customize()
                    .interceptor(recorder.clone())
                    .send()
                    .await
                    .map_err(|error| publish_failure(&error))?;

                Ok::<_, PublishFailure>(publish_receipt(
                    output.message_id(),
                    recorder.status(),
                ))
            })
        })
    }
}

/// Remembers the HTTP status of the broker's response for a single call.
#[derive(Debug, Clone, Default)]
pub struct ResponseStatusRecorder {
    status: Arc<Mutex<Option<u16>>>,
}

impl ResponseStatusRecorder {
    pub fn status(&self) -> Option<u16> {
        self.status.lock().ok().and_then(|status| *status)
    }

    fn record(&self, status: u16) {
        if let Ok(mut slot) = self.status.lock() {
            *slot = Some(status);
        }
    }
}

impl Intercept for ResponseStatusRecorder {
    fn name(&self) -> &'static str {
        "ResponseStatusRecorder"
    }

    fn read_before_deserialization(
        &self,
        context: &BeforeDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        self.record(context.response().status().as_u16());
        Ok(())
    }
}

pub fn publish_receipt(message_id: Option<&str>, observed_status: Option<u16>) -> PublishReceipt {
    PublishReceipt {
        status_code: observed_status.unwrap_or(FALLBACK_SUCCESS_STATUS),
        message_id: message_id.unwrap_or_default().to_string(),
    }
}

/// Maps an SDK failure onto the broker's own status. Failures that never
/// produced a response (timeouts, dispatch, request construction) carry
/// `None`.
pub fn publish_failure<E>(error: &SdkError<E, HttpResponse>) -> PublishFailure
where
    E: std::error::Error + 'static,
{
    PublishFailure {
        status_code: error
            .raw_response()
            .map(|response| response.status().as_u16()),
        message: format!("failed to publish to sns: {}", DisplayErrorContext(error)),
    }
}

#[cfg(test)]
mod tests {
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use thiserror::Error;

    use super::*;

    #[derive(Debug, Error)]
    #[error("Topic does not exist")]
    struct TopicNotFound;

    fn broker_response(status: u16) -> HttpResponse {
        HttpResponse::new(
            StatusCode::try_from(status).expect("status should be valid"),
            SdkBody::empty(),
        )
    }

    #[test]
    fn service_error_keeps_broker_status() {
        for status in [400, 403, 404, 429, 500, 503] {
            let error = SdkError::service_error(TopicNotFound, broker_response(status));
            let failure = publish_failure(&error);

            assert_eq!(failure.status_code, Some(status));
            assert!(failure.message.contains("Topic does not exist"));
        }
    }

    #[test]
    fn timeout_has_no_broker_status() {
        let error: SdkError<TopicNotFound, HttpResponse> =
            SdkError::timeout_error("operation timed out after 3s");
        let failure = publish_failure(&error);

        assert_eq!(failure.status_code, None);
        assert!(failure.message.starts_with("failed to publish to sns"));
    }

    #[test]
    fn construction_failure_has_no_broker_status() {
        let error: SdkError<TopicNotFound, HttpResponse> =
            SdkError::construction_failure("missing topic arn");

        assert_eq!(publish_failure(&error).status_code, None);
    }

    #[test]
    fn receipt_uses_observed_status() {
        let receipt = publish_receipt(Some("5f0d9c1e"), Some(202));
        assert_eq!(receipt.status_code, 202);
        assert_eq!(receipt.message_id, "5f0d9c1e");

        let unobserved = publish_receipt(None, None);
        assert_eq!(unobserved.status_code, FALLBACK_SUCCESS_STATUS);
        assert_eq!(unobserved.message_id, "");
    }

    #[test]
    fn recorder_starts_empty_and_shares_state_across_clones() {
        let recorder = ResponseStatusRecorder::default();
        assert_eq!(recorder.status(), None);

        recorder.clone().record(200);
        assert_eq!(recorder.status(), Some(200));
    }
}
