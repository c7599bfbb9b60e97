use std::path::{Path, PathBuf};

/// Use this as the "directory" of a [`FileLogger`](crate::FileLogger)
/// to write all log lines to stdout.
pub const STDOUT: &str = "stream://stdout";
/// Use this as the "directory" of a [`FileLogger`](crate::FileLogger)
/// to write all log lines to stderr.
pub const STDERR: &str = "stream://stderr";
/// Use this as the "directory" of a [`FileLogger`](crate::FileLogger)
/// to write all log lines into memory;
/// see [`FileLogger::memory_contents`](crate::FileLogger::memory_contents).
pub const MEMORY: &str = "stream://memory";

// File extensions that mark an explicitly given file name as complete.
const LOG_EXTENSIONS: [&str; 2] = ["log", "txt"];

// A stream that is used instead of a log directory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StreamKind {
    Stdout,
    Stderr,
    Memory,
}

// Where the log lines go.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Target {
    Directory(PathBuf),
    Stream(StreamKind),
}
impl Target {
    pub(crate) fn from_path(path: PathBuf) -> Self {
        match path.to_str() {
            Some(STDOUT) => Self::Stream(StreamKind::Stdout),
            Some(STDERR) => Self::Stream(StreamKind::Stderr),
            Some(MEMORY) => Self::Stream(StreamKind::Memory),
            _ => Self::Directory(path),
        }
    }
}

// Derives the names of the log files.
//
// `<directory>/<filename>` with the suffix inserted before `.log` or `.txt`,
// or `<directory>/<filename><suffix>.<extension>`, if a filename is given;
// `<directory>/<prefix><YYYY-MM-DD><suffix>.<extension>` otherwise.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileSpec {
    pub(crate) directory: PathBuf,
    pub(crate) o_filename: Option<String>,
    pub(crate) prefix: String,
    pub(crate) extension: String,
}
impl FileSpec {
    pub(crate) fn as_pathbuf(&self, suffix: &str, day: &str) -> PathBuf {
        match self.o_filename {
            Some(ref filename) => self
                .directory
                .join(with_suffix(filename, suffix, &self.extension)),
            None => self.directory.join(format!(
                "{}{day}{suffix}.{}",
                self.prefix, self.extension
            )),
        }
    }
}

fn with_suffix(filename: &str, suffix: &str, extension: &str) -> PathBuf {
    let path = Path::new(filename);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext))
            if LOG_EXTENSIONS
                .iter()
                .any(|l| ext.to_string_lossy().eq_ignore_ascii_case(l)) =>
        {
            let mut name = stem.to_os_string();
            name.push(suffix);
            name.push(".");
            name.push(ext);
            path.with_file_name(name)
        }
        _ => PathBuf::from(format!("{filename}{suffix}.{extension}")),
    }
}
