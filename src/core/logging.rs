//! File logging for the terminal client.
//!
//! The TUI owns stdout, so everything goes to a JSON log under the data
//! directory. Call sites use the `log` macros; `LogTracer` forwards them into
//! the `tracing` subscriber, which is installed without its own log bridge.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

const APP_DIR: &str = "ttrpg-notes";
const LOG_PREFIX: &str = "ttrpg-notes.log";

/// Global logging could not be installed.
#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("Failed to initialize LogTracer: {0}")]
    Bridge(#[from] log::SetLoggerError),

    #[error("Failed to set tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// `<data_dir>/ttrpg-notes/logs`, or `./logs` when there is no data dir.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize logging for TUI mode.
///
/// Keep the returned guard alive for the lifetime of the program; dropping it
/// flushes and stops the background writer.
pub fn init_tui() -> WorkerGuard {
    let log_dir = log_dir();

    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer: the TUI owns the terminal
    if let Err(e) = install(tracing_subscriber::registry().with(file_layer)) {
        eprintln!("{}", e);
    }

    std::thread::spawn(move || {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        compress_old_logs(&log_dir, &today);
    });

    guard
}

/// Bridge `log` records into `tracing`, then make `subscriber` the global
/// default. Only the first call in a process succeeds.
fn install<S>(subscriber: S) -> Result<(), LogInitError>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Rolled files are named `<prefix>.YYYY-MM-DD`. Everything but today's
/// file is a candidate.
fn should_compress(name: &str, today: &str) -> bool {
    name.strip_prefix(LOG_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| !date.is_empty() && date != today && !date.ends_with(".gz"))
}

/// Gzip rolled log files from previous days and remove the originals.
fn compress_old_logs(log_dir: &Path, today: &str) {
    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, today) {
            continue;
        }

        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent.join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}
