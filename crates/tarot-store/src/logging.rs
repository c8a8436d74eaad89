use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::StoreConfig;

const LOG_FILE_NAME: &str = "tarot.log.jsonl";

/// Keeps the background log writer alive; logs stop flushing once dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Installs a JSON subscriber writing to `<log_dir>/tarot.log.jsonl`.
///
/// Returns `None` when structured logging is disabled in `config` or when
/// another global subscriber is already installed.
pub fn init_logging(config: &StoreConfig) -> Result<Option<LoggingGuard>> {
    let logging = &config.logging;
    if !logging.enable_structured {
        return Ok(None);
    }

    let log_dir = logging
        .resolved_log_dir()
        .unwrap_or_else(|| config.resolved_root());
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory at {}", log_dir.display()))?;

    let log_path = log_path(&log_dir);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        tracing::warn!(
            target: "tarot_store::logging",
            error = %err,
            path = %log_path.display(),
            "a global subscriber is already installed; structured log file left unused"
        );
        return Ok(None);
    }

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path,
    }))
}

fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}
