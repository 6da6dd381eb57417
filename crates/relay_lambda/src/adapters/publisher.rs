use thiserror::Error;

/// The broker's acknowledgment of a published message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub status_code: u16,
    pub message_id: String,
}

/// A failed publish call. `status_code` carries the broker's HTTP status when
/// the broker answered and is `None` when the request never got a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PublishFailure {
    pub status_code: Option<u16>,
    pub message: String,
}

pub trait TopicPublisher {
    fn publish(&self, topic_arn: &str, message: &str) -> Result<PublishReceipt, PublishFailure>;
}
