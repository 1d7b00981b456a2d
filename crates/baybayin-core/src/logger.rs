//! Process logger for the `baybayin` tools.
//!
//! Prints `[elapsed LEVEL stage] message` to stderr, where `stage` is the
//! last module path segment of the record target, so pipeline decisions show
//! up as `crop`, `resize`, `stroke` and so on. Everything goes to stderr,
//! which keeps stdout free for command output (labels, predictions).
//!
//! The level is chosen once per process with [`level_from_env`]: the
//! `BAYBAYIN_LOG` variable wins, otherwise `--verbose` selects `debug` and
//! the default is `warn`. Library crates only talk to the `log` facade and
//! stay silent until [`init_with_level`] installs the logger.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let target = short_target(record.target());
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            target,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Drop the crate prefix so `baybayin_preprocess::crop` prints as `crop`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Environment variable overriding the log level (`off`, `error` ... `trace`).
pub const LOG_ENV: &str = "BAYBAYIN_LOG";

/// Resolve the level from an optional override and the verbose flag.
///
/// An unparsable override is ignored.
pub fn resolve_level(spec: Option<&str>, verbose: bool) -> LevelFilter {
    spec.and_then(|s| s.trim().parse().ok()).unwrap_or(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    })
}

/// [`resolve_level`] with the override read from [`LOG_ENV`].
pub fn level_from_env(verbose: bool) -> LevelFilter {
    resolve_level(std::env::var(LOG_ENV).ok().as_deref(), verbose)
}

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization; the first level wins.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .with_writer(std::io::stderr)
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_target_keeps_last_path_segment() {
        assert_eq!(short_target("baybayin_preprocess::crop"), "crop");
        assert_eq!(short_target("baybayin"), "baybayin");
    }

    #[test]
    fn override_beats_verbose_flag() {
        assert_eq!(resolve_level(None, false), LevelFilter::Warn);
        assert_eq!(resolve_level(None, true), LevelFilter::Debug);
        assert_eq!(resolve_level(Some("trace"), false), LevelFilter::Trace);
        assert_eq!(resolve_level(Some(" OFF "), true), LevelFilter::Off);
        assert_eq!(resolve_level(Some("loud"), true), LevelFilter::Debug);
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        assert!(init_with_level(LevelFilter::Warn).is_ok());
        assert!(init_with_level(LevelFilter::Debug).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Warn);
    }
}
