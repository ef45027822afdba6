//! Structured logging setup.
//!
//! JSON-formatted records on stderr, optionally mirrored to a daily log file
//! (`stats-collection-YYYY-MM-DD.log`) when a log directory is configured.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Uses the `RUST_LOG` env var if set, otherwise defaults to `info`. The
/// mirror sink is best-effort: a directory or file that cannot be created is
/// reported on stderr and skipped, never fatal to the pipeline.
pub fn init(log_dir: Option<&str>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer().json().with_writer(std::io::stderr);

    let mirror = log_dir.and_then(|dir| match open_daily_log(Path::new(dir)) {
        Ok(file) => Some(fmt::layer().json().with_ansi(false).with_writer(Arc::new(file))),
        Err(e) => {
            eprintln!("Failed to set up log mirror in {}: {}", dir, e);
            None
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(mirror)
        .init();
}

/// Open (append) today's mirror file in `dir`, creating the directory when
/// missing.
fn open_daily_log(dir: &Path) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(daily_log_path(dir))
}

fn daily_log_path(dir: &Path) -> PathBuf {
    dir.join(format!(
        "stats-collection-{}.log",
        Utc::now().format("%Y-%m-%d")
    ))
}
