// only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! A small file logger that writes leveled, timestamped log lines to disk,
//! optionally split by severity into several files.
//!
//! ```rust
//! use file_group_logger::{Context, FileLogger, Severity};
//!
//! let mut logger = FileLogger::try_new("log_files", Severity::Info).unwrap();
//! logger.error("disk full", &Context::new()).unwrap();
//! ```
//!
//! See
//!
//! * the builder [`FileLoggerBuilder`] for a full description of all configuration options,
//! * [`FileGroup`] for how log lines are distributed over several files,
//! * [`FileLogger::start`] for using the logger with the macros of the `log` crate.
//!
//! By default, the logger writes into three files per day in the given directory,
//! e.g. `log_2026-10-17_error.txt`, `log_2026-10-17_warning.txt`,
//! and `log_2026-10-17_info.txt`.
//! With a custom file name, the date is not part of the file names.
//!
//! There are configuration options to e.g.
//!
//! * choose the file name, its prefix, and its extension,
//! * define own file groups, or write everything into a single file,
//! * specify the line format with a template,
//! * render a structured context below each message,
//! * force a flush to disk after every n-th line,
//! * write to stdout, stderr, or into memory instead of files.

mod builder;
mod deferred_now;
mod destination;
mod file_group;
mod file_logger;
mod file_spec;
mod formats;
mod logger_error;
mod logger_handle;
mod severity;
mod util;

pub use crate::builder::{
    FileLoggerBuilder, DEFAULT_EXTENSION, DEFAULT_PERMISSIONS, DEFAULT_PREFIX,
};
pub use crate::deferred_now::{DateFormat, DeferredNow, DEFAULT_DATE_FORMAT};
pub use crate::file_group::{DestinationKey, FileGroup};
pub use crate::file_logger::{Context, FileLogger};
pub use crate::file_spec::{MEMORY, STDERR, STDOUT};
pub use crate::formats::{
    context_to_string, indent, PH_CONTEXT, PH_DATE, PH_LEVEL, PH_LEVEL_PADDING, PH_MESSAGE,
    PH_PRIORITY,
};
pub use crate::logger_error::FileLoggerError;
pub use crate::logger_handle::LoggerHandle;
pub use crate::severity::Severity;

/// Re-export of the value type that contexts are built from.
pub use serde_json::{json, Value};
