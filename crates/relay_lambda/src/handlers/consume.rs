use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::adapters::delay::WorkloadDelay;
use crate::adapters::message_log::MessageLog;
use crate::runtime::batch::SqsBatchResponse;
use crate::runtime::contract::{decode_message, CodecError, RelayMessage};
use crate::runtime::envelope::unwrap_notification;

/// Collaborators the consumer needs for one invocation.
#[derive(Clone, Copy)]
pub struct ConsumerCapabilities<'a> {
    pub delay: &'a dyn WorkloadDelay,
    pub log: &'a dyn MessageLog,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsumeError {
    #[error("SQS event must include Records array")]
    MissingRecords,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("SQS record body must be a string")]
    MissingBody,
    #[error(transparent)]
    Decode(#[from] CodecError),
}

/// Processes every record of an SQS event, one after another in delivery
/// order.
///
/// A record that cannot be decoded is reported in the returned
/// `batchItemFailures` and does not stop the records after it.
pub fn handle_queue_event(
    event: &Value,
    capabilities: ConsumerCapabilities<'_>,
) -> Result<SqsBatchResponse, ConsumeError> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or(ConsumeError::MissingRecords)?;

    let mut response = SqsBatchResponse::default();
    for record in records {
        let message_id = record
            .get("messageId")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match decode_record(record) {
            Ok(message) => {
                let started_at = Instant::now();
                process_message(message_id, &message, capabilities);
                debug!(
                    message_id = %message_id,
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "SQS record processed"
                );
            }
            Err(error) => {
                warn!(message_id = %message_id, error = %error, "Failed to process SQS record");
                response.record_failure(message_id);
            }
        }
    }

    info!(
        records = records.len(),
        failed = response.batch_item_failures.len(),
        "SQS batch finished"
    );
    Ok(response)
}

pub fn decode_record(record: &Value) -> Result<RelayMessage, RecordError> {
    let body = record
        .get("body")
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingBody)?;
    Ok(decode_message(&unwrap_notification(body))?)
}

/// Blocks for the message's effective duration, then logs it.
pub fn process_message(
    message_id: &str,
    message: &RelayMessage,
    capabilities: ConsumerCapabilities<'_>,
) {
    capabilities.delay.wait(message.effective_duration());
    capabilities.log.processed(message_id, message);
}
