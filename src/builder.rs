use crate::{
    deferred_now::DateFormat,
    file_group::FileGroups,
    file_spec::{FileSpec, Target},
    FileGroup, FileLogger, FileLoggerError, Severity,
};
use std::path::PathBuf;

/// Default extension of the log files.
pub const DEFAULT_EXTENSION: &str = "txt";
/// Default prefix of date-derived log file names.
pub const DEFAULT_PREFIX: &str = "log_";
/// Default permissions for created log directories (only used on unix).
pub const DEFAULT_PERMISSIONS: u32 = 0o777;

// The immutable configuration of a FileLogger.
#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) target: Target,
    pub(crate) file_spec: FileSpec,
    pub(crate) o_log_format: Option<String>,
    pub(crate) append_context: bool,
    pub(crate) flush_frequency: usize,
    pub(crate) default_permissions: u32,
    pub(crate) file_groups: FileGroups,
}

/// Builder for [`FileLogger`].
///
/// Is created with [`FileLogger::builder`], all options have sensible defaults.
///
/// ```rust
/// # use file_group_logger::{FileLogger, Severity};
/// let mut logger = FileLogger::builder("log_files")
///     .threshold(Severity::Info)
///     .filename("app.log")
///     .flush_frequency(10)
///     .try_build()
///     .unwrap();
/// ```
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct FileLoggerBuilder {
    directory: PathBuf,
    threshold: Severity,
    extension: String,
    date_format: String,
    o_filename: Option<String>,
    flush_frequency: usize,
    prefix: String,
    o_log_format: Option<String>,
    append_context: bool,
    file_groups: Vec<FileGroup>,
    default_permissions: u32,
}

/// Simple methods for influencing the behavior of the `FileLogger`.
impl FileLoggerBuilder {
    pub(crate) fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            threshold: Severity::Debug,
            extension: DEFAULT_EXTENSION.to_string(),
            date_format: crate::DEFAULT_DATE_FORMAT.to_string(),
            o_filename: None,
            flush_frequency: 0,
            prefix: DEFAULT_PREFIX.to_string(),
            o_log_format: None,
            append_context: true,
            file_groups: FileGroup::defaults(),
            default_permissions: DEFAULT_PERMISSIONS,
        }
    }

    /// Sets the least severe severity that is still written; the default is `Debug`.
    #[must_use]
    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Specifies the extension of the log files. The default is "txt".
    #[must_use]
    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    /// Specifies the `chrono` pattern for the timestamps in the log lines.
    ///
    /// The default, [`DEFAULT_DATE_FORMAT`](crate::DEFAULT_DATE_FORMAT),
    /// produces timestamps like `2026-10-17 09:15:02.123456`.
    #[must_use]
    pub fn date_format<S: Into<String>>(mut self, date_format: S) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Uses the given file name instead of a name that is derived from the prefix
    /// and the current date.
    ///
    /// If the name ends with `.log` or `.txt`, it is used as is
    /// (file group suffixes are inserted before the extension),
    /// otherwise the group suffix and the configured extension are appended.
    #[must_use]
    pub fn filename<S: Into<String>>(self, filename: S) -> Self {
        self.o_filename(Some(filename))
    }

    /// Makes the logger force a destination's content to stable storage
    /// (`sync_data`) after every `n`-th written line.
    ///
    /// Every line is handed to the OS when it is written, so it is visible
    /// to readers of the file immediately.
    /// With 0, which is the default, the OS decides when the data reach the disk.
    #[must_use]
    pub fn flush_frequency(mut self, n: usize) -> Self {
        self.flush_frequency = n;
        self
    }

    /// Specifies the prefix of date-derived file names. The default is "log_".
    #[must_use]
    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Uses a custom template for the log lines.
    ///
    /// The template can contain the placeholders `{date}`, `{level}`, `{level-padding}`,
    /// `{priority}`, `{message}`, and `{context}`.
    /// Without a template, lines look like `[<timestamp>] [<level>] <message>`.
    #[must_use]
    pub fn log_format<S: Into<String>>(self, template: S) -> Self {
        self.o_log_format(Some(template))
    }

    /// Defines if a non-empty context is appended, indented, below the message line.
    /// The default is true.
    #[must_use]
    pub fn append_context(mut self, append_context: bool) -> Self {
        self.append_context = append_context;
        self
    }

    /// Replaces the default file groups.
    ///
    /// Each log line goes to the first group that contains its severity;
    /// severities that no group contains go to an additional, unsuffixed file.
    /// An empty vector switches to single-file mode.
    #[must_use]
    pub fn file_groups(mut self, file_groups: Vec<FileGroup>) -> Self {
        self.file_groups = file_groups;
        self
    }

    /// Writes all log lines into a single file.
    #[must_use]
    pub fn no_file_groups(self) -> Self {
        self.file_groups(Vec::new())
    }

    /// Sets the permissions for log directories that need to be created. The default is 0o777.
    #[must_use]
    pub fn default_permissions(mut self, permissions: u32) -> Self {
        self.default_permissions = permissions;
        self
    }

    /// Produces the `FileLogger` and opens all its destinations.
    ///
    /// # Errors
    ///
    /// `FileLoggerError::InvalidDateFormat` or `FileLoggerError::InvalidFileGroups`
    /// for an unusable configuration,
    /// `FileLoggerError::Permission` if a log file exists but cannot be written,
    /// `FileLoggerError::Open` or `FileLoggerError::OutputBadDirectory`
    /// if the directory or a file cannot be used.
    pub fn try_build(self) -> Result<FileLogger, FileLoggerError> {
        let date_format = DateFormat::try_new(self.date_format)?;
        let file_groups = FileGroups::try_new(self.file_groups)?;
        let config = Config {
            target: Target::from_path(self.directory.clone()),
            file_spec: FileSpec {
                directory: self.directory,
                o_filename: self.o_filename,
                prefix: self.prefix,
                extension: self.extension,
            },
            o_log_format: self.o_log_format,
            append_context: self.append_context,
            flush_frequency: self.flush_frequency,
            default_permissions: self.default_permissions,
            file_groups,
        };
        FileLogger::try_new_with_config(config, self.threshold, date_format)
    }
}

/// Alternative set of methods to control the behavior of the `FileLoggerBuilder`.
/// Use these methods when you want to control the settings flexibly,
/// e.g. with commandline arguments via `clap`.
impl FileLoggerBuilder {
    /// Uses the given file name, or a date-derived name when `None` is given.
    #[must_use]
    pub fn o_filename<S: Into<String>>(mut self, o_filename: Option<S>) -> Self {
        self.o_filename = o_filename.map(Into::into);
        self
    }

    /// Uses the given template, or the default line format when `None` is given.
    #[must_use]
    pub fn o_log_format<S: Into<String>>(mut self, o_template: Option<S>) -> Self {
        self.o_log_format = o_template.map(Into::into);
        self
    }
}
