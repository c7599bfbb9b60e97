use crate::FileLoggerError;
use std::{fmt, str::FromStr};

/// Severity of a log line.
///
/// The eight levels follow [RFC 5424](https://datatracker.ietf.org/doc/rfc5424).
/// A lower rank means a more severe message; `Emergency` is the most severe,
/// `Debug` the least severe.
///
/// The derived ordering follows the rank, so `Severity::Error < Severity::Info`
/// holds because errors are more urgent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    /// System is unusable.
    Emergency = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Critical = 2,
    /// Error conditions.
    Error = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

impl Severity {
    /// All severities, from the most to the least severe.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Numeric rank, `0` for `Emergency` up to `7` for `Debug`.
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as used in the default line format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Returns true if a message with this severity passes the given threshold.
    #[must_use]
    pub fn passes(self, threshold: Severity) -> bool {
        self.rank() <= threshold.rank()
    }

    // The log crate has no counterpart for the three most severe levels,
    // so it can only ever produce errors or less severe messages.
    pub(crate) fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }

    pub(crate) fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Emergency | Self::Alert | Self::Critical | Self::Error => log::LevelFilter::Error,
            Self::Warning => log::LevelFilter::Warn,
            Self::Notice | Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = FileLoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emergency" | "emerg" => Ok(Self::Emergency),
            "alert" => Ok(Self::Alert),
            "critical" | "crit" => Ok(Self::Critical),
            "error" | "err" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "notice" => Ok(Self::Notice),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(FileLoggerError::UnknownSeverity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Severity;

    #[test]
    fn test_rank_order() {
        for (i, severity) in Severity::ALL.iter().enumerate() {
            assert_eq!(usize::from(severity.rank()), i);
        }
        assert!(Severity::Emergency < Severity::Debug);
        assert!(Severity::Error.passes(Severity::Warning));
        assert!(Severity::Warning.passes(Severity::Warning));
        assert!(!Severity::Notice.passes(Severity::Warning));
    }

    #[test]
    fn test_parse() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(" critical ".parse::<Severity>().unwrap(), Severity::Critical);
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>().unwrap(), severity);
        }
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(Severity::from_log_level(log::Level::Trace), Severity::Debug);
        assert_eq!(Severity::from_log_level(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::Notice.to_level_filter(), log::LevelFilter::Info);
        assert_eq!(Severity::Alert.to_level_filter(), log::LevelFilter::Error);
    }
}
