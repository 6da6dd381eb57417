pub mod delay;
pub mod message_log;
pub mod publisher;
pub mod sns;
