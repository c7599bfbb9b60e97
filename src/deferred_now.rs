use crate::FileLoggerError;
use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Local,
};

/// Default format for the timestamps in log lines, with microsecond precision.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Deferred timestamp creation.
///
/// The current time is taken once, on first use,
/// and can then be rendered several times and in different formats.
#[derive(Debug, Default)]
pub struct DeferredNow(Option<DateTime<Local>>);

impl DeferredNow {
    /// Constructs a new instance, but does not generate the timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self(None)
    }

    /// Retrieve the timestamp.
    ///
    /// Requires mutability because the first caller will generate the timestamp.
    /// The timestamp keeps the full sub-second precision of the system clock.
    pub fn now(&mut self) -> &DateTime<Local> {
        self.0.get_or_insert_with(Local::now)
    }

    /// Convert into a formatted String.
    pub fn format(&mut self, fmt: &DateFormat) -> String {
        self.now()
            .format_with_items(StrftimeItems::new(fmt.as_str()))
            .to_string()
    }

    // The calendar day that goes into date-derived file names.
    pub(crate) fn day(&mut self) -> String {
        self.now().format("%Y-%m-%d").to_string()
    }
}

/// A validated `chrono` format pattern for the timestamps of log lines.
///
/// Sub-second digits are only written if the pattern asks for them,
/// e.g. with `%.6f` (microseconds) or `%.3f` (milliseconds).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateFormat(String);
impl DateFormat {
    /// Validates the given pattern.
    ///
    /// # Errors
    ///
    /// [`FileLoggerError::InvalidDateFormat`] if `chrono` cannot interpret the pattern.
    pub fn try_new<S: Into<String>>(pattern: S) -> Result<Self, FileLoggerError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            Err(FileLoggerError::InvalidDateFormat(pattern))
        } else {
            Ok(Self(pattern))
        }
    }

    /// The pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_string())
    }
}
