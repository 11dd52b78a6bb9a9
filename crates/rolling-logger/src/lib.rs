//! Rolling file logger
//!
//! Installs a global `tracing` subscriber that writes to stderr and to
//! `<log_dir>/<app_name>.log`. When the file reaches `max_file_bytes` it is
//! shifted to `<app_name>.1.log`, older files move up by one, and anything
//! beyond `max_files` is dropped, so disk usage stays bounded.
//!
//! Records emitted through the `log` facade are forwarded to the same
//! subscriber.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to prepare log file: {0}")]
    Io(#[from] io::Error),
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Size at which the active file is rotated
    pub max_file_bytes: u64,
    /// Rotated files kept besides the active one
    pub max_files: usize,
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 2 * 1024 * 1024,
            max_files: 3,
            level: "info".to_string(),
        }
    }
}

/// The active log file plus its rotation policy
pub struct RollingFile {
    dir: PathBuf,
    stem: String,
    file: File,
    written: u64,
    max_file_bytes: u64,
    max_files: usize,
}

impl RollingFile {
    pub fn open(dir: &Path, stem: &str, max_file_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = Self::path_for(dir, stem, 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            file,
            written,
            max_file_bytes,
            max_files,
        })
    }

    fn path_for(dir: &Path, stem: &str, index: usize) -> PathBuf {
        if index == 0 {
            dir.join(format!("{}.log", stem))
        } else {
            dir.join(format!("{}.{}.log", stem, index))
        }
    }

    pub fn active_path(&self) -> PathBuf {
        Self::path_for(&self.dir, &self.stem, 0)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        // With max_files == 0 this is the active file itself
        let oldest = Self::path_for(&self.dir, &self.stem, self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..self.max_files).rev() {
            let from = Self::path_for(&self.dir, &self.stem, index);
            if from.exists() {
                fs::rename(&from, Self::path_for(&self.dir, &self.stem, index + 1))?;
            }
        }

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_file_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Shared handle handed to the fmt layer
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingWriter {
    pub fn new(file: RollingFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install the global subscriber with default limits. Returns the path of
/// the active log file.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_with_config(log_dir, app_name, LoggerConfig::default())
}

pub fn init_with_config(log_dir: PathBuf, app_name: &str, config: LoggerConfig) -> Result<PathBuf, LoggerError> {
    let mut file = RollingFile::open(&log_dir, app_name, config.max_file_bytes, config.max_files)?;
    let active = file.active_path();
    writeln!(
        file,
        "==== {} started {} ====",
        app_name,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(RollingWriter::new(file));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    // try_init also installs the log -> tracing bridge
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(path = %active.display(), "logger initialized");
    Ok(active)
}

/// Log an info line through the `log` facade
pub fn info(message: &str) -> Result<(), LoggerError> {
    log::info!(target: "app", "{}", message);
    Ok(())
}

/// Log an error line through the `log` facade
pub fn error(message: &str) -> Result<(), LoggerError> {
    log::error!(target: "app", "{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rotates_when_full() {
        let dir = TempDir::new().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 64, 2).unwrap();

        for i in 0..10 {
            let line = format!("line number {:02} padded out to be long\n", i);
            file.write_all(line.as_bytes()).unwrap();
        }
        file.flush().unwrap();

        assert!(dir.path().join("app.log").exists());
        assert!(dir.path().join("app.1.log").exists());
        assert!(dir.path().join("app.2.log").exists());
        assert!(!dir.path().join("app.3.log").exists());

        let active = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(active.contains("line number 09"));
        assert!(active.len() as u64 <= 64);
    }

    #[test]
    fn test_reopen_appends() {
        let dir = TempDir::new().unwrap();
        {
            let mut file = RollingFile::open(dir.path(), "app", 1024, 1).unwrap();
            file.write_all(b"first\n").unwrap();
        }
        let mut file = RollingFile::open(dir.path(), "app", 1024, 1).unwrap();
        file.write_all(b"second\n").unwrap();
        file.flush().unwrap();

        let content = fs::read_to_string(file.active_path()).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_oversized_write_goes_to_fresh_file() {
        let dir = TempDir::new().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 8, 1).unwrap();
        file.write_all(b"tiny\n").unwrap();
        file.write_all(b"this line is longer than the cap\n").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.1.log")).unwrap(), "tiny\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("app.log")).unwrap(),
            "this line is longer than the cap\n"
        );
    }

    #[test]
    fn test_init_writes_to_file() {
        let dir = TempDir::new().unwrap();
        let path = init_logger(dir.path().to_path_buf(), "travel").unwrap();
        tracing::info!("hello from tracing");
        info("hello from log").unwrap();
        error("something failed").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("travel started"));
        assert!(content.contains("hello from tracing"));
        assert!(content.contains("hello from log"));
        assert!(content.contains("something failed"));

        // A second install is refused
        assert!(matches!(
            init_logger(dir.path().to_path_buf(), "travel"),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}
