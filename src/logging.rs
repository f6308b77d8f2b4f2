// src/logging.rs
//! Logger setup for the command line binary

use std::io::Write;

/// Initialise `env_logger` at `level`, writing to stderr so log lines stay out of the playback view.
///
/// `RUST_LOG` still takes precedence for per-module filters.
pub fn setup_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{0} {1} {2}] {3}",
                record.level(),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}
