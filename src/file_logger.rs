use crate::{
    builder::Config,
    deferred_now::{DateFormat, DeferredNow},
    destination::{create_dir_all, Destination},
    file_group::FileGroups,
    file_spec::Target,
    formats::{format_message, LineSpec},
    util::{eprint_err, ErrorCode},
    DestinationKey, FileLoggerBuilder, FileLoggerError, LoggerHandle, Severity,
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Auxiliary data of a single log call, rendered below the message line
/// and available to the `{context}` placeholder.
///
/// Entries keep their insertion order.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Writes leveled, timestamped log lines into one or more files.
///
/// All destinations are opened when the logger is built, and closed when it is dropped.
/// Messages that are less severe than the current threshold are silently discarded,
/// all other failures are returned to the caller.
///
/// `FileLogger` has no internal locking: the line counter and the last written line
/// are plain fields, and writing requires `&mut self`.
/// Several processes that write into the same file rely on the OS's append semantics.
/// Use [`FileLogger::start`] to share a logger between threads via the `log` crate.
///
/// ```rust
/// use file_group_logger::{Context, FileLogger, Severity};
///
/// let mut logger = FileLogger::try_new("log_files", Severity::Warning).unwrap();
/// logger.error("disk full", &Context::new()).unwrap();
/// logger.info("not written", &Context::new()).unwrap();
/// ```
#[derive(Debug)]
pub struct FileLogger {
    config: Config,
    threshold: Severity,
    date_format: DateFormat,
    destinations: BTreeMap<DestinationKey, Destination>,
    line_count: u64,
    sync_count: u64,
    last_line: String,
}

impl FileLogger {
    /// Starts the configuration of a logger that writes into the given directory,
    /// or into one of the streams [`STDOUT`](crate::STDOUT), [`STDERR`](crate::STDERR),
    /// and [`MEMORY`](crate::MEMORY).
    pub fn builder<P: Into<PathBuf>>(directory: P) -> FileLoggerBuilder {
        FileLoggerBuilder::new(directory.into())
    }

    /// Creates a logger with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`FileLoggerBuilder::try_build`].
    pub fn try_new<P: Into<PathBuf>>(
        directory: P,
        threshold: Severity,
    ) -> Result<Self, FileLoggerError> {
        Self::builder(directory).threshold(threshold).try_build()
    }

    pub(crate) fn try_new_with_config(
        mut config: Config,
        threshold: Severity,
        date_format: DateFormat,
    ) -> Result<Self, FileLoggerError> {
        let mut destinations = BTreeMap::new();
        match config.target {
            Target::Stream(kind) => {
                config.file_groups = FileGroups::default();
                destinations.insert(
                    DestinationKey::Default,
                    Destination::open_stream(kind, config.file_spec.directory.clone()),
                );
            }
            Target::Directory(ref directory) => {
                create_dir_all(directory, config.default_permissions)?;
                let day = DeferredNow::new().day();
                for (key, group) in config.file_groups.iter() {
                    let path = config.file_spec.as_pathbuf(group.suffix(), &day);
                    destinations.insert(key, Destination::try_open_file(path)?);
                }
                if config.file_groups.is_empty() || config.file_groups.needs_default() {
                    let path = config.file_spec.as_pathbuf("", &day);
                    destinations
                        .insert(DestinationKey::Default, Destination::try_open_file(path)?);
                }
            }
        }

        Ok(Self {
            config,
            threshold,
            date_format,
            destinations,
            line_count: 0,
            sync_count: 0,
            last_line: String::new(),
        })
    }

    /// Formats the message and appends it to the destination of its severity,
    /// if the severity passes the threshold.
    ///
    /// # Errors
    ///
    /// `FileLoggerError::Write` if writing fails.
    pub fn log(
        &mut self,
        severity: Severity,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        if !severity.passes(self.threshold) {
            return Ok(());
        }
        let line = self.format_message(severity, message, context);
        self.write(&line, self.destination_for(severity))
    }

    /// Appends a preformatted line to the given destination, regardless of the threshold.
    ///
    /// The line is written as is, no line break is added.
    /// Nothing is recorded as written if the append fails.
    ///
    /// # Errors
    ///
    /// `FileLoggerError::UnknownDestination` if the logger has no such destination,
    /// `FileLoggerError::Write` if writing or flushing fails.
    pub fn write(&mut self, line: &str, key: DestinationKey) -> Result<(), FileLoggerError> {
        let destination = self
            .destinations
            .get_mut(&key)
            .ok_or(FileLoggerError::UnknownDestination(key))?;
        destination.append(line.as_bytes())?;

        self.last_line = line.trim().to_string();
        self.line_count += 1;
        let frequency = self.config.flush_frequency as u64;
        if frequency > 0 && self.line_count % frequency == 0 {
            destination.sync()?;
            self.sync_count += 1;
        }
        Ok(())
    }

    /// Produces the complete log line, including the context block and the final line break.
    #[must_use]
    pub fn format_message(
        &self,
        severity: Severity,
        message: &str,
        context: &crate::Context,
    ) -> String {
        let timestamp = DeferredNow::new().format(&self.date_format);
        format_message(
            self.config.o_log_format.as_deref(),
            self.config.append_context,
            &LineSpec {
                timestamp: &timestamp,
                severity,
                message,
                context,
            },
        )
    }

    /// Logs with severity `Emergency`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn emergency(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Emergency, message, context)
    }

    /// Logs with severity `Alert`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn alert(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Alert, message, context)
    }

    /// Logs with severity `Critical`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn critical(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Critical, message, context)
    }

    /// Logs with severity `Error`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn error(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Error, message, context)
    }

    /// Logs with severity `Warning`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn warning(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Warning, message, context)
    }

    /// Logs with severity `Notice`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn notice(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Notice, message, context)
    }

    /// Logs with severity `Info`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn info(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Info, message, context)
    }

    /// Logs with severity `Debug`.
    ///
    /// # Errors
    ///
    /// See [`FileLogger::log`].
    pub fn debug(
        &mut self,
        message: &str,
        context: &crate::Context,
    ) -> Result<(), FileLoggerError> {
        self.log(Severity::Debug, message, context)
    }

    /// The destination that log lines of the given severity are written to.
    #[must_use]
    pub fn destination_for(&self, severity: Severity) -> DestinationKey {
        self.config.file_groups.route(severity)
    }

    /// The keys of all open destinations.
    pub fn destinations(&self) -> impl Iterator<Item = DestinationKey> + '_ {
        self.destinations.keys().copied()
    }

    /// The path of the given destination, or the stream name in stream mode.
    #[must_use]
    pub fn log_file_path(&self, key: DestinationKey) -> Option<&Path> {
        self.destinations.get(&key).map(Destination::path)
    }

    /// The path of the file that log lines of the given severity are written to.
    #[must_use]
    pub fn log_file_path_for(&self, severity: Severity) -> Option<&Path> {
        self.log_file_path(self.destination_for(severity))
    }

    /// The last written line, without surrounding whitespace.
    #[must_use]
    pub fn last_logged_line(&self) -> &str {
        &self.last_line
    }

    /// Number of lines written so far.
    #[must_use]
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Number of times a destination was forced to stable storage
    /// because of the configured flush frequency.
    #[must_use]
    pub fn sync_count(&self) -> u64 {
        self.sync_count
    }

    /// The current threshold.
    #[must_use]
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Changes the threshold; messages that are less severe are discarded.
    pub fn set_threshold(&mut self, threshold: Severity) {
        self.threshold = threshold;
    }

    /// The current `chrono` pattern for timestamps.
    #[must_use]
    pub fn date_format(&self) -> &str {
        self.date_format.as_str()
    }

    /// Changes the pattern for the timestamps of subsequent log lines.
    ///
    /// # Errors
    ///
    /// `FileLoggerError::InvalidDateFormat` if the pattern is not usable;
    /// the previous pattern stays in effect then.
    pub fn set_date_format(&mut self, date_format: &str) -> Result<(), FileLoggerError> {
        self.date_format = DateFormat::try_new(date_format)?;
        Ok(())
    }

    /// What was written so far, if the logger writes to [`MEMORY`](crate::MEMORY).
    #[must_use]
    pub fn memory_contents(&self) -> Option<String> {
        self.destinations
            .get(&DestinationKey::Default)
            .and_then(Destination::memory)
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
    }

    /// Flushes all destinations; for stdout and stderr this writes out their buffers.
    ///
    /// # Errors
    ///
    /// `FileLoggerError::Write` if flushing fails for some destination;
    /// the other destinations are flushed nevertheless.
    pub fn flush(&mut self) -> Result<(), FileLoggerError> {
        let mut result = Ok(());
        for destination in self.destinations.values_mut() {
            if let Err(e) = destination.flush() {
                result = Err(FileLoggerError::Write(e));
            }
        }
        result
    }

    /// Flushes and closes all destinations.
    ///
    /// # Errors
    ///
    /// `FileLoggerError::Write` if flushing fails.
    pub fn close(mut self) -> Result<(), FileLoggerError> {
        let result = self.flush();
        self.destinations.clear();
        result
    }

    /// Moves the logger behind the `log` crate's macros.
    ///
    /// The logger's threshold is also applied to `log::max_level`.
    ///
    /// # Errors
    ///
    /// `FileLoggerError::Log` if a global logger is already installed.
    pub fn start(self) -> Result<LoggerHandle, FileLoggerError> {
        LoggerHandle::install(self)
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        for destination in self.destinations.values_mut() {
            destination.flush().unwrap_or_else(|e| {
                eprint_err(ErrorCode::Flush, "flushing on drop failed", &e);
            });
        }
    }
}

#[cfg(test)]
mod test {
    use super::FileLogger;
    use crate::{Context, DestinationKey, FileLoggerError, Severity, MEMORY};
    use serde_json::json;

    fn memory_logger(threshold: Severity) -> FileLogger {
        FileLogger::try_new(MEMORY, threshold).unwrap()
    }

    #[test]
    fn test_threshold() {
        let mut logger = memory_logger(Severity::Warning);
        logger.notice("dropped", &Context::new()).unwrap();
        assert_eq!(logger.line_count(), 0);
        assert_eq!(logger.memory_contents().unwrap(), "");

        logger.error("disk full", &Context::new()).unwrap();
        logger.warning("low memory", &Context::new()).unwrap();
        assert_eq!(logger.line_count(), 2);
        assert!(logger.last_logged_line().ends_with("] [warning] low memory"));

        logger.set_threshold(Severity::Debug);
        logger.debug("now visible", &Context::new()).unwrap();
        assert_eq!(logger.line_count(), 3);
    }

    #[test]
    fn test_stream_mode_has_single_destination() {
        let logger = memory_logger(Severity::Debug);
        assert_eq!(
            logger.destinations().collect::<Vec<_>>(),
            vec![DestinationKey::Default]
        );
        for severity in Severity::ALL {
            assert_eq!(logger.destination_for(severity), DestinationKey::Default);
        }
        assert_eq!(
            logger.log_file_path(DestinationKey::Default).unwrap(),
            std::path::Path::new(MEMORY)
        );
    }

    #[test]
    fn test_last_line_and_write() {
        let mut logger = memory_logger(Severity::Emergency);
        logger.write("  raw line  \n", DestinationKey::Default).unwrap();
        assert_eq!(logger.last_logged_line(), "raw line");
        assert_eq!(logger.memory_contents().unwrap(), "  raw line  \n");

        match logger.write("x\n", DestinationKey::Group(0)) {
            Err(FileLoggerError::UnknownDestination(DestinationKey::Group(0))) => {}
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(logger.line_count(), 1);
    }

    #[test]
    fn test_context_and_template() {
        let mut logger = FileLogger::builder(MEMORY)
            .log_format("{level}|{message}")
            .try_build()
            .unwrap();
        logger.info("started", &Context::new()).unwrap();
        assert_eq!(logger.memory_contents().unwrap(), "INFO|started\n");

        let context = json!({"x": 5, "y": [1, 2]}).as_object().cloned().unwrap();
        logger.info("values", &context).unwrap();
        assert_eq!(
            logger.memory_contents().unwrap(),
            "INFO|started\nINFO|values\n    x: 5\n    y: [\n        1,\n        2,\n    ]\n"
        );
        assert_eq!(
            logger.last_logged_line(),
            "INFO|values\n    x: 5\n    y: [\n        1,\n        2,\n    ]"
        );
    }

    #[test]
    fn test_date_format() {
        let mut logger = FileLogger::builder(MEMORY)
            .date_format("%Y")
            .try_build()
            .unwrap();
        assert_eq!(logger.date_format(), "%Y");
        assert!(logger.set_date_format("%Q").is_err());
        assert_eq!(logger.date_format(), "%Y");

        logger.set_date_format("fixed").unwrap();
        logger.alert("a", &Context::new()).unwrap();
        assert_eq!(logger.last_logged_line(), "[fixed] [alert] a");

        assert!(FileLogger::builder(MEMORY)
            .date_format("%")
            .try_build()
            .is_err());
    }
}
