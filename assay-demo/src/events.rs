use std::fmt::Display;

use assay_core::trace_categories;
use tracing_subscriber::{Layer, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// Type of event to trace.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, clap::ValueEnum)]
pub(crate) enum TraceEvent {
    /// Traces assertion decisions.
    #[clap(name = "assertions")]
    Assertions,
    /// Traces parameter lookups.
    #[clap(name = "params")]
    Params,
    /// Traces case and iteration scheduling.
    #[clap(name = "runner")]
    Runner,
}

impl TraceEvent {
    const fn target(self) -> &'static str {
        match self {
            Self::Assertions => trace_categories::ASSERTIONS,
            Self::Params => trace_categories::PARAMS,
            Self::Runner => trace_categories::RUNNER,
        }
    }
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.target())
    }
}

/// Installs a stderr subscriber logging at INFO, plus DEBUG for the enabled categories.
pub(crate) fn init(enabled: &[TraceEvent]) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(compose_filter(enabled));

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        // Something went wrong; proceed on anyway but complain audibly.
        eprintln!("warning: failed to initialize tracing.");
    }
}

fn compose_filter(enabled: &[TraceEvent]) -> Targets {
    Targets::new()
        .with_default(tracing_subscriber::filter::LevelFilter::INFO)
        .with_targets(
            enabled
                .iter()
                .map(|event| (event.target(), tracing::Level::DEBUG)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn enabled_categories_log_at_debug() {
        let filter = compose_filter(&[TraceEvent::Params]);

        assert!(filter.would_enable(trace_categories::PARAMS, &tracing::Level::DEBUG));
        assert!(!filter.would_enable(trace_categories::RUNNER, &tracing::Level::DEBUG));
        assert!(filter.would_enable(trace_categories::RUNNER, &tracing::Level::INFO));
        assert_eq!(filter.default_level(), Some(LevelFilter::INFO));
    }

    #[test]
    fn display_matches_target() {
        assert_eq!(TraceEvent::Assertions.to_string(), "assertions");
    }
}
