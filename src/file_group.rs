use crate::{FileLoggerError, Severity};

/// Identifies one open log destination of a [`FileLogger`](crate::FileLogger).
///
/// `Group(i)` refers to the `i`-th configured [`FileGroup`];
/// `Default` is the destination for all severities that no group claims,
/// and the only destination in single-file mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DestinationKey {
    /// The single-file destination, or the fallback for uncovered severities.
    Default,
    /// The destination of the file group with the given index.
    Group(usize),
}

/// A named bucket of severities that is written to its own log file.
///
/// The file name of the group's destination is derived from the logger's naming rules,
/// with the group's `suffix` inserted before the extension.
///
/// ```rust
/// # use file_group_logger::{FileGroup, Severity};
/// let alerts = FileGroup::new("alerts", "_alerts", [Severity::Emergency, Severity::Alert]);
/// assert!(alerts.contains(Severity::Alert));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileGroup {
    name: String,
    suffix: String,
    severities: Vec<Severity>,
}
impl FileGroup {
    /// Creates a file group.
    pub fn new<N, S, I>(name: N, suffix: S, severities: I) -> Self
    where
        N: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = Severity>,
    {
        Self {
            name: name.into(),
            suffix: suffix.into(),
            severities: severities.into_iter().collect(),
        }
    }

    /// The group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suffix that is added to the file name of the group's destination.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The severities that are routed to this group.
    #[must_use]
    pub fn severities(&self) -> &[Severity] {
        &self.severities
    }

    /// Returns true if the group claims the given severity.
    #[must_use]
    pub fn contains(&self, severity: Severity) -> bool {
        self.severities.contains(&severity)
    }

    /// The groups that are used if nothing else is configured:
    /// errors and worse, warnings, and everything less severe than a warning.
    #[must_use]
    pub fn defaults() -> Vec<FileGroup> {
        vec![
            FileGroup::new(
                "error",
                "_error",
                [
                    Severity::Emergency,
                    Severity::Alert,
                    Severity::Critical,
                    Severity::Error,
                ],
            ),
            FileGroup::new("warning", "_warning", [Severity::Warning]),
            FileGroup::new(
                "info",
                "_info",
                [Severity::Notice, Severity::Info, Severity::Debug],
            ),
        ]
    }
}

// The validated, ordered list of file groups of a logger.
#[derive(Clone, Debug, Default)]
pub(crate) struct FileGroups(Vec<FileGroup>);
impl FileGroups {
    pub(crate) fn try_new(groups: Vec<FileGroup>) -> Result<Self, FileLoggerError> {
        for (i, group) in groups.iter().enumerate() {
            if group.suffix.is_empty() {
                return Err(FileLoggerError::InvalidFileGroups(format!(
                    "group '{}' has an empty suffix",
                    group.name
                )));
            }
            if groups[..i].iter().any(|g| g.suffix == group.suffix) {
                return Err(FileLoggerError::InvalidFileGroups(format!(
                    "suffix '{}' is used by more than one group",
                    group.suffix
                )));
            }
        }
        Ok(Self(groups))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (DestinationKey, &FileGroup)> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, group)| (DestinationKey::Group(i), group))
    }

    // The first group that contains the severity wins.
    pub(crate) fn route(&self, severity: Severity) -> DestinationKey {
        self.iter()
            .find(|(_, group)| group.contains(severity))
            .map_or(DestinationKey::Default, |(key, _)| key)
    }

    // A default destination is needed if some severity would not be claimed by any group.
    pub(crate) fn needs_default(&self) -> bool {
        Severity::ALL
            .iter()
            .any(|s| self.route(*s) == DestinationKey::Default)
    }
}
