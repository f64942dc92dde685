//! Tracing subscriber setup.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_FILE_PREFIX: &str = "message-server.log";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `MESSAGE_LOG`; an invalid filter falls back to
/// `info` with a warning on stderr. When `log_dir` is set, records go to a
/// daily rolling file through a non-blocking writer, and the returned guard
/// must be held until shutdown so buffered lines are flushed.
pub fn init(cfg: &Config) -> Option<WorkerGuard> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_target(true)
        .with_thread_ids(true);

    match &cfg.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = subscriber.with_writer(writer).with_ansi(false);
            if cfg.log_json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }
            Some(guard)
        }
        None => {
            if cfg.log_json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }
            None
        }
    }
}

fn env_filter(cfg: &Config) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match cfg.log_level.parse::<EnvFilter>() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!(
                "WARN: MESSAGE_LOG='{}' is not a valid tracing filter ({}); \
                 falling back to 'info'",
                cfg.log_level, e
            );
            EnvFilter::new("info")
        }
    }
}
