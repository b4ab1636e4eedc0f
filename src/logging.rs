//! Logging initialisation.
//!
//! The terminal belongs to the UI, so logs only go to `nook.log` in the nook
//! directory. `NOOK_LOG` takes an `EnvFilter` directive and defaults to `warn`.
//!
//! Keep the returned guard alive for the process so buffered lines are
//! flushed on exit.

use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "NOOK_LOG";
const LOG_FILE_NAME: &str = "nook.log";

pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber writing to `<dir>/nook.log`.
///
/// With no directory logging stays off.
pub fn init(dir: Option<&Path>) -> LogGuard {
    let Some(dir) = dir else {
        return LogGuard { _file_guard: None };
    };

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Already installed (tests, repeated init): keep the first one
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .try_init();

    LogGuard {
        _file_guard: Some(guard),
    }
}
