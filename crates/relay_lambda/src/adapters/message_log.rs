use tracing::info;

use crate::runtime::contract::RelayMessage;

/// Receives one record per processed queue message.
pub trait MessageLog {
    fn processed(&self, message_id: &str, message: &RelayMessage);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMessageLog;

impl MessageLog for TracingMessageLog {
    fn processed(&self, message_id: &str, message: &RelayMessage) {
        let text = message.text_or_empty();
        info!(
            message_id = %message_id,
            text = %text,
            "Processed message: {text}"
        );
    }
}
