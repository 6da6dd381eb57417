//! Environment-driven settings for the relay binaries.

pub const TOPIC_ARN_ENV: &str = "TOPIC_ARN";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Destination topic. `None` when unset or blank.
    pub topic_arn: Option<String>,
}

impl PublisherConfig {
    /// Reads the process environment. Called per request, so a changed
    /// variable is picked up by the next invocation.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let topic_arn = lookup(TOPIC_ARN_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { topic_arn }
    }
}
