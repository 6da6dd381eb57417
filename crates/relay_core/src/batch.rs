use serde::{Deserialize, Serialize};

/// A message the consumer could not process, identified by the queue's
/// message id so the platform redelivers only that message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchItemFailure {
    #[serde(rename = "itemIdentifier")]
    pub item_identifier: String,
}

/// Partial batch response returned from a queue-triggered invocation.
///
/// An empty failure list reports the whole batch as processed. Only honoured
/// when the event source mapping enables `ReportBatchItemFailures`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SqsBatchResponse {
    #[serde(rename = "batchItemFailures")]
    pub batch_item_failures: Vec<BatchItemFailure>,
}

impl SqsBatchResponse {
    pub fn record_failure(&mut self, item_identifier: impl Into<String>) {
        self.batch_item_failures.push(BatchItemFailure {
            item_identifier: item_identifier.into(),
        });
    }

    pub fn is_complete_success(&self) -> bool {
        self.batch_item_failures.is_empty()
    }

    pub fn failed_identifiers(&self) -> Vec<&str> {
        self.batch_item_failures
            .iter()
            .map(|failure| failure.item_identifier.as_str())
            .collect()
    }
}
