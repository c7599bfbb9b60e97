#![allow(dead_code)]

use file_group_logger::{Context, Value};
use std::path::Path;

// Each test works in its own directory, which is removed when the test ends.
pub fn dir() -> temp_dir::TempDir {
    temp_dir::TempDir::new().unwrap()
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("cannot read {path:?}: {e}"))
}

pub fn context(value: Value) -> Context {
    value.as_object().cloned().unwrap()
}

// Number of files in the directory that match the pattern.
pub fn count_files(dir: &Path, pattern: &str) -> usize {
    glob::glob(&dir.join(pattern).display().to_string())
        .unwrap()
        .filter_map(Result::ok)
        .count()
}

// Checks that a line looks like "[2026-10-17 09:15:02.123456] [<level>] <message>".
pub fn assert_default_line(line: &str, level: &str, message: &str) {
    let suffix = format!("] [{level}] {message}");
    assert!(line.starts_with('['), "{line:?}");
    assert!(line.ends_with(&suffix), "{line:?}");
    let timestamp = &line[1..line.len() - suffix.len()];
    chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.6f")
        .unwrap_or_else(|e| panic!("bad timestamp {timestamp:?}: {e}"));
    assert_eq!(timestamp.len(), 26, "{timestamp:?}");
}
