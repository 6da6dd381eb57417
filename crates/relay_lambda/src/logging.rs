use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV};

/// Installs the JSON `tracing` subscriber for a Lambda cold start.
///
/// Timestamps are left to the Lambda log sink. Uses `try_init` so repeated
/// calls (tests, warm starts) are harmless.
pub fn init() {
    let filter = resolve_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref());

    let _ = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .try_init();
}

fn resolve_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_filter() {
        let default = EnvFilter::new(DEFAULT_LOG_FILTER).to_string();
        assert_eq!(resolve_filter(None).to_string(), default);
        assert_eq!(resolve_filter(Some("  ")).to_string(), default);
    }

    #[test]
    fn keeps_explicit_directive() {
        assert_eq!(
            resolve_filter(Some("relay_lambda=debug")).to_string(),
            EnvFilter::new("relay_lambda=debug").to_string()
        );
    }

    #[test]
    fn init_can_run_more_than_once() {
        init();
        init();
    }
}
