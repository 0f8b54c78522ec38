/*============================================================
  Project: apkver
  Module: apkver::error
  ------------------------------------------------------------
  Purpose:
    Centralise apkver error types so every failure carries a
    readable message and a stable exit code.

  Security / Safety Notes:
    Messages include URLs and file paths only; response bodies
    are never embedded.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Propagated by every module up to the binary entry point,
    which prints the message and exits with `exit_code()`.

  Revision History:
    2026-10-19  Established shared error definitions.
============================================================*/

use std::process::ExitCode;

use thiserror::Error;

/// Result alias for apkver operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Error domains surfaced while fetching and recording a release.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Network: {0}")]
    Network(String),
    #[error("Could not find {0}")]
    NotFound(&'static str),
    #[error("Extraction: {0}")]
    Extraction(String),
    #[error("Serialization: {0}")]
    Serialization(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
    #[error("Runtime: {0}")]
    Runtime(String),
}

impl FetchError {
    /// Map error category to a deterministic exit code.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    fn code(&self) -> u8 {
        match self {
            FetchError::Config(_) => 20,
            FetchError::Network(_) => 30,
            FetchError::Serialization(_) => 31,
            FetchError::NotFound(_) => 32,
            FetchError::Extraction(_) => 33,
            FetchError::Filesystem(_) => 40,
            FetchError::Runtime(_) => 50,
        }
    }

    /// Short uppercase tag used as the log code for this failure.
    pub fn log_code(&self) -> &'static str {
        match self {
            FetchError::Config(_) => "CONFIG",
            FetchError::Network(_) => "NETWORK",
            FetchError::NotFound(_) => "MARKUP",
            FetchError::Extraction(_) => "EXTRACT",
            FetchError::Serialization(_) => "SERIALIZE",
            FetchError::Filesystem(_) => "FS",
            FetchError::Runtime(_) => "RUNTIME",
        }
    }
}
