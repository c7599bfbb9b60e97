use crate::DestinationKey;
use std::path::PathBuf;
use thiserror::Error;

/// Describes errors in the initialization and in the use of a [`FileLogger`](crate::FileLogger).
#[derive(Error, Debug)]
#[non_exhaustive]
#[allow(clippy::module_name_repetitions)]
pub enum FileLoggerError {
    /// A log file exists but cannot be written because it is read-only.
    #[error("The log file is not writable: {0:?}")]
    Permission(PathBuf),

    /// The configured output directory exists but is not a directory.
    #[error("Log cannot be written because the configured output directory is not a directory: {0:?}")]
    OutputBadDirectory(PathBuf),

    /// The output directory could not be created, or a log file could not be opened.
    #[error("Log file {path:?} cannot be opened")]
    Open {
        /// The directory or file that was tried.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing a log line failed.
    #[error("Writing the log failed")]
    Write(#[from] std::io::Error),

    /// No destination is open for the given key.
    #[error("No log destination is open for {0:?}")]
    UnknownDestination(DestinationKey),

    /// The given date format contains an invalid pattern.
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// The given string does not name a severity.
    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    /// The file groups cannot be used to route log lines.
    #[error("Invalid file groups: {0}")]
    InvalidFileGroups(String),

    /// Installing the logger with the `log` crate failed.
    #[error("Logger initialization failed")]
    Log(#[from] log::SetLoggerError),
}
