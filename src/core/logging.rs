//! Structured logging setup
//!
//! JSON or text output via the tracing ecosystem, writing to stdout or a
//! size-rotated log file.

use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Logger handle; dropping it flushes the non-blocking writer.
pub struct Logger {
    _guard: Option<WorkerGuard>,
}

impl Logger {
    /// Initialize the global tracing subscriber from configuration.
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let level = parse_log_level(&config.level)?;

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        let (writer, guard) = match config.output.as_str() {
            "stdout" => {
                let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
                (non_blocking, Some(guard))
            }
            "file" => {
                let log_file = config
                    .log_file
                    .as_ref()
                    .context("log_file must be specified when output is 'file'")?;

                if let Some(parent) = log_file.parent() {
                    std::fs::create_dir_all(parent).context("Failed to create log directory")?;
                }

                let appender =
                    SizeRotatingWriter::new(log_file, config.max_file_size, config.max_backups)?;
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                (non_blocking, Some(guard))
            }
            other => anyhow::bail!("Invalid output configuration: {}", other),
        };

        let fmt_layer = match config.format.as_str() {
            "json" => fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_target(true)
                .boxed(),
            "text" => fmt::layer().with_writer(writer).with_target(true).boxed(),
            other => anyhow::bail!("Invalid format configuration: {}", other),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize tracing subscriber")?;

        tracing::info!(
            level = %config.level,
            format = %config.format,
            output = %config.output,
            "Logging system initialized"
        );

        Ok(Logger { _guard: guard })
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {}", level),
    }
}

/// File writer that rotates when the current file exceeds `max_size`.
///
/// Backups are shifted `app.log.1 -> app.log.2 -> ...` up to `max_backups`,
/// after which the oldest is dropped.
struct SizeRotatingWriter {
    path: PathBuf,
    max_size: usize,
    max_backups: usize,
    file: std::fs::File,
    written: usize,
}

impl SizeRotatingWriter {
    fn new(path: &Path, max_size: usize, max_backups: usize) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        let written = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

        Ok(Self {
            path: path.to_path_buf(),
            max_size,
            max_backups,
            file,
            written,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> std::io::Result<()> {
        self.file.flush()?;

        for i in (1..self.max_backups).rev() {
            let from = self.backup_path(i);
            if from.exists() {
                std::fs::rename(&from, self.backup_path(i + 1))?;
            }
        }
        if self.path.exists() {
            std::fs::rename(&self.path, self.backup_path(1))?;
        }

        self.file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for SizeRotatingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.written + buf.len() > self.max_size {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_rotation_shifts_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = SizeRotatingWriter::new(&path, 16, 2).unwrap();

        writer.write_all(b"0123456789").unwrap();
        // Next write would exceed max_size, forcing a rotation first.
        writer.write_all(b"abcdefghij").unwrap();
        writer.flush().unwrap();

        assert!(path.exists());
        assert!(dir.path().join("app.log.1").exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abcdefghij");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("app.log.1")).unwrap(),
            "0123456789"
        );
    }
}
