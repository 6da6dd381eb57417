//! Lambda side of the SNS relay.
//!
//! `handlers` holds the two entry-point functions: the HTTP publish relay
//! and the SQS batch consumer. Both are plain functions over
//! `serde_json::Value` events and take their collaborators (topic publisher,
//! workload delay, message log) as trait objects from `adapters`, so the
//! binaries in `src/bin` only wire real AWS clients into them.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
