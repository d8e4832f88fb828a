//! Logging setup shared by binaries, tests and benchmarks of the toric workspace.
//!
//! The library crates only talk to the `log` facade; this crate is what turns
//! those records into lines on stderr.
use std::io::Write;

use env_logger::fmt::Formatter;
use log::{LevelFilter, Record};

/// Level used when `RUST_LOG` is not set.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

fn format_record(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let now = time::OffsetDateTime::now_utc();

    writeln!(
        buf,
        "{} {} time={} target={}",
        record.level(),
        record.args(),
        now,
        record.target()
    )
}

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(DEFAULT_LEVEL).parse_env("RUST_LOG");
    builder.format(format_record);
    builder
}

/// Log to stderr.
///
/// If called multiple times in the same process, only applies once.
pub fn log_to_stderr() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        builder().init();
    });
}

/// Install a logger whose output is captured by the test harness.
///
/// Safe to call from every test; only the first call in a process wins.
pub fn log_for_tests() {
    // Another test may already have installed a logger.
    let _ = builder().is_test(true).try_init();
}
