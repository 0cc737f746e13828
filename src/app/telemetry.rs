//! Subscriber setup for the binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::AppError;

/// Filter used when neither `RUST_LOG` nor `--log-filter` is given.
pub const DEFAULT_LOG_FILTER: &str = "info,scoped_lifetimes=debug";

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG` wins over `fallback_filter` when set and valid.
pub fn init_tracing(fallback_filter: Option<&str>) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .map_err(|e| AppError::Telemetry(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))
}
