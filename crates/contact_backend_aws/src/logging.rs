use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Local terminal runs keep timestamps.
    Terminal,
    /// CloudWatch stamps ingestion time itself.
    Lambda,
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(target: LogTarget) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::Terminal => builder.init(),
        LogTarget::Lambda => builder.without_time().init(),
    }
}
