/*============================================================
  Project: apkver
  Module: apkver::logger
  ------------------------------------------------------------
  Purpose:
    Structured, append-only logging for a fetch session, with
    an optional log file sealed by a SHA-256 digest.

  Security / Safety Notes:
    Only URLs, paths and extracted release values are logged;
    page bodies are never written.

  Dependencies:
    chrono for UTC timestamps, sha2 for the session digest.

  Operational Scope:
    One logger per process, created from CLI flags and config
    before any request is made.

  Revision History:
    2026-10-19  Adapted session logger for apkver.
============================================================*/

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::error::{FetchError, Result};

/// Severity of a log entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Warnings and errors reach stderr even without `--verbose`.
    fn always_shown(self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

fn render(timestamp: DateTime<Utc>, level: LogLevel, code: &str, message: &str) -> String {
    format!(
        "{} [{}] [{}] {}",
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        level.as_str(),
        code,
        message
    )
}

/// Session logger writing to stderr and, optionally, a log file.
pub struct Logger {
    file: Option<Mutex<BufWriter<File>>>,
    path: Option<PathBuf>,
    verbose: bool,
}

impl Logger {
    /// Build a logger; when `path` is set, entries are appended to it.
    pub fn new(path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let file = match path.as_deref() {
            Some(file_path) => Some(Mutex::new(BufWriter::new(open_append(file_path)?))),
            None => None,
        };
        Ok(Self {
            file,
            path,
            verbose,
        })
    }

    pub fn log<S: AsRef<str>>(&self, level: LogLevel, code: &str, message: S) {
        let line = render(Utc::now(), level, code, message.as_ref());

        if self.verbose || level.always_shown() {
            eprintln!("{line}");
        }

        let Some(file) = &self.file else {
            return;
        };
        if let Ok(mut guard) = file.lock() {
            if writeln!(guard, "{line}").and_then(|_| guard.flush()).is_err() {
                eprintln!(
                    "{}",
                    render(Utc::now(), LogLevel::Error, "LOGGER", "Failed to write to log file")
                );
            }
        }
    }

    pub fn info<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Info, code, message);
    }

    pub fn warn<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Warn, code, message);
    }

    pub fn error<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Error, code, message);
    }

    pub fn debug<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Debug, code, message);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write `<log>.hash` containing the SHA-256 of the log file in
    /// `sha256sum` format. No-op without a log file.
    pub fn finalize(&self) -> Result<()> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        let data = std::fs::read(path).map_err(|err| {
            FetchError::Filesystem(format!(
                "Failed to read log for hashing {}: {err}",
                path.display()
            ))
        })?;
        let digest = Sha256::digest(&data);

        let mut hash_os = path.as_os_str().to_os_string();
        hash_os.push(".hash");
        let hash_path = PathBuf::from(hash_os);
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        std::fs::write(&hash_path, format!("{digest:x}  {name}\n")).map_err(|err| {
            FetchError::Filesystem(format!(
                "Failed to write hash file {}: {err}",
                hash_path.display()
            ))
        })
    }
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            FetchError::Filesystem(format!(
                "Failed to create log directory {}: {err}",
                parent.display()
            ))
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| {
            FetchError::Filesystem(format!("Failed to open log file {}: {err}", path.display()))
        })
}
