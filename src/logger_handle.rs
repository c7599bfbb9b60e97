use crate::{
    util::{eprint_err, eprint_msg, ErrorCode},
    Context, FileLogger, FileLoggerError, Severity,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// Gives access to a [`FileLogger`] that is installed as the `log` crate's global logger,
/// and **flushes the logger when it is dropped**.
///
/// A `LoggerHandle` is returned from [`FileLogger::start`].
/// Keep it alive until the very end of your program.
///
/// ```rust
/// use file_group_logger::{FileLogger, Severity};
/// use log::{error, info};
///
/// let handle = FileLogger::try_new("log_files", Severity::Info)
///     .unwrap()
///     .start()
///     .unwrap();
/// error!("disk full");
/// handle.set_threshold(Severity::Warning);
/// info!("discarded");
/// ```
#[derive(Clone, Debug)]
pub struct LoggerHandle {
    am_logger: Arc<Mutex<FileLogger>>,
}

impl LoggerHandle {
    pub(crate) fn install(logger: FileLogger) -> Result<Self, FileLoggerError> {
        let max_level = logger.threshold().to_level_filter();
        let am_logger = Arc::new(Mutex::new(logger));
        log::set_boxed_logger(Box::new(GlobalLogger {
            am_logger: Arc::clone(&am_logger),
        }))?;
        log::set_max_level(max_level);
        Ok(Self { am_logger })
    }

    fn lock(&self) -> MutexGuard<'_, FileLogger> {
        lock(&self.am_logger)
    }

    /// Changes the threshold of the logger and the `log` crate's max level.
    pub fn set_threshold(&self, threshold: Severity) {
        self.lock().set_threshold(threshold);
        log::set_max_level(threshold.to_level_filter());
    }

    /// Logs with a severity that the `log` crate cannot express, e.g. `Critical`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn log(
        &self,
        severity: Severity,
        message: &str,
        context: &Context,
    ) -> Result<(), FileLoggerError> {
        self.lock().log(severity, message, context)
    }

    /// The last line that the logger has written.
    #[must_use]
    pub fn last_logged_line(&self) -> String {
        self.lock().last_logged_line().to_string()
    }

    /// Flushes all destinations of the logger.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::flush`].
    pub fn flush(&self) -> Result<(), FileLoggerError> {
        self.lock().flush()
    }

    /// Runs the given function with exclusive access to the logger.
    pub fn with_logger<R, F: FnOnce(&mut FileLogger) -> R>(&self, f: F) -> R {
        f(&mut self.lock())
    }
}

impl Drop for LoggerHandle {
    fn drop(&mut self) {
        if Arc::strong_count(&self.am_logger) <= 2 {
            self.flush().unwrap_or_else(|e| {
                eprint_err(ErrorCode::Flush, "flushing on shutdown failed", &e);
            });
        }
    }
}

// A poisoned logger is still usable; a panic during a log call must not silence the log.
fn lock(am_logger: &Mutex<FileLogger>) -> MutexGuard<'_, FileLogger> {
    am_logger.lock().unwrap_or_else(|e| {
        eprint_msg(ErrorCode::Poison, "logger mutex is poisoned");
        e.into_inner()
    })
}

// The instance that is registered with the log crate.
#[derive(Debug)]
struct GlobalLogger {
    am_logger: Arc<Mutex<FileLogger>>,
}

impl log::Log for GlobalLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Severity::from_log_level(metadata.level()).passes(lock(&self.am_logger).threshold())
    }

    fn log(&self, record: &log::Record) {
        let severity = Severity::from_log_level(record.level());
        let message = record.args().to_string();
        lock(&self.am_logger)
            .log(severity, &message, &Context::new())
            .unwrap_or_else(|e| eprint_err(ErrorCode::Write, "writing failed", &e));
    }

    fn flush(&self) {
        lock(&self.am_logger)
            .flush()
            .unwrap_or_else(|e| eprint_err(ErrorCode::Flush, "flushing failed", &e));
    }
}
