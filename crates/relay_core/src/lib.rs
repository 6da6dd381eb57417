//! Shared relay domain primitives.
//!
//! This crate owns the message schema exchanged between the publish relay and
//! the queue consumer, its wire codec, and the batch response contract. It
//! excludes AWS SDK and Lambda runtime concerns.

pub mod batch;
pub mod contract;
pub mod envelope;
