//! Stderr logging for the `boardsight` crates.
//!
//! Lines look like `+  0.012s  WARN classify: message`: time since the logger
//! was installed, level, and the emitting crate with its `boardsight_` prefix
//! dropped. Records from other crates (image decoders, clap) only pass at
//! warn and above, whatever level is requested for our own crates.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose records follow the requested level.
const OWN_TARGETS: [&str; 4] = [
    "boardsight",
    "boardsight_core",
    "boardsight_board",
    "boardsight_classify",
];

/// Level applied to every other crate.
const FOREIGN_LEVEL: LevelFilter = LevelFilter::Warn;

fn is_own_target(target: &str) -> bool {
    let krate = target.split("::").next().unwrap_or(target);
    OWN_TARGETS.contains(&krate)
}

fn short_target(target: &str) -> &str {
    let krate = target.split("::").next().unwrap_or(target);
    match krate.strip_prefix("boardsight_") {
        Some(rest) => rest,
        None => krate,
    }
}

fn format_line(elapsed_s: f64, level: Level, target: &str, msg: &std::fmt::Arguments<'_>) -> String {
    format!("+{elapsed_s:7.3}s {level:>5} {}: {msg}", short_target(target))
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl StderrLogger {
    fn allows(&self, level: Level, target: &str) -> bool {
        let limit = if is_own_target(target) {
            self.level
        } else {
            self.level.min(FOREIGN_LEVEL)
        };
        level <= limit
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.allows(metadata.level(), metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger. Only the first call picks the level.
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

/// Map a `-v` count to a level: 0 → warn, 1 → info, 2 → debug, more → trace.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `EnvFilter` directives equivalent to the stderr logger's filtering.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn filter_directives(level: LevelFilter) -> String {
    let own = level.to_string().to_ascii_lowercase();
    let foreign = level.min(FOREIGN_LEVEL).to_string().to_ascii_lowercase();
    let mut directives = foreign;
    for target in OWN_TARGETS {
        directives.push_str(&format!(",{target}={own}"));
    }
    directives
}

/// Output style of [`init_tracing`].
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable lines with uptime, span close timings included.
    #[default]
    Compact,
    /// One flattened JSON object per event.
    Json,
}

/// Install a `tracing` subscriber filtered like [`init_with_level`].
///
/// `RUST_LOG`, when set, replaces the level-derived filter.
#[cfg(feature = "tracing")]
pub fn init_tracing(format: TracingFormat, level: LevelFilter) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));
    let builder = fmt().with_env_filter(filter).with_span_events(FmtSpan::CLOSE);
    match format {
        TracingFormat::Compact => builder
            .compact()
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init(),
        TracingFormat::Json => builder.json().flatten_event(true).finish().try_init(),
    }
}
