use crate::{file_spec::StreamKind, FileLoggerError};
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

// Where the bytes of one destination go.
#[derive(Debug)]
enum Sink {
    File(File),
    Stdout(std::io::Stdout),
    Stderr(std::io::Stderr),
    Memory(Vec<u8>),
}

// An open, append-only log destination, exclusively owned by its logger.
//
// Every append goes straight to the OS, so a failing write is seen by the caller
// that issued it. Files are closed when the destination is dropped.
#[derive(Debug)]
pub(crate) struct Destination {
    path: PathBuf,
    sink: Sink,
}
impl Destination {
    // Fails with `Permission` if the file exists but cannot be written by this process,
    // without trying to open it.
    pub(crate) fn try_open_file(path: PathBuf) -> Result<Self, FileLoggerError> {
        if std::fs::metadata(&path).is_ok() && !is_writable(&path) {
            return Err(FileLoggerError::Permission(path));
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| FileLoggerError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            sink: Sink::File(file),
        })
    }

    pub(crate) fn open_stream(kind: StreamKind, path: PathBuf) -> Self {
        let sink = match kind {
            StreamKind::Stdout => Sink::Stdout(std::io::stdout()),
            StreamKind::Stderr => Sink::Stderr(std::io::stderr()),
            StreamKind::Memory => Sink::Memory(Vec::new()),
        };
        Self { path, sink }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn append(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match self.sink {
            Sink::File(ref mut w) => w.write_all(bytes),
            Sink::Stdout(ref mut w) => w.write_all(bytes),
            Sink::Stderr(ref mut w) => w.write_all(bytes),
            Sink::Memory(ref mut buf) => {
                buf.extend_from_slice(bytes);
                Ok(())
            }
        }
    }

    pub(crate) fn flush(&mut self) -> std::io::Result<()> {
        match self.sink {
            Sink::File(ref mut w) => w.flush(),
            Sink::Stdout(ref mut w) => w.flush(),
            Sink::Stderr(ref mut w) => w.flush(),
            Sink::Memory(_) => Ok(()),
        }
    }

    // Flushes and forces the file's content to stable storage.
    pub(crate) fn sync(&mut self) -> std::io::Result<()> {
        self.flush()?;
        if let Sink::File(ref f) = self.sink {
            f.sync_data()?;
        }
        Ok(())
    }

    pub(crate) fn memory(&self) -> Option<&[u8]> {
        match self.sink {
            Sink::Memory(ref buf) => Some(buf.as_slice()),
            _ => None,
        }
    }
}

// Write permission bits alone do not tell if this process may write,
// e.g. for files of other users; the read-only flag is still honored for privileged users.
#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};
    let readonly = std::fs::metadata(path).is_ok_and(|m| m.permissions().readonly());
    !readonly && access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
}

// Creates the directory, with the given permissions where the platform supports them.
pub(crate) fn create_dir_all(directory: &Path, permissions: u32) -> Result<(), FileLoggerError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(permissions);
    }
    #[cfg(not(unix))]
    let _ = permissions;

    builder
        .create(directory)
        .map_err(|source| FileLoggerError::Open {
            path: directory.to_path_buf(),
            source,
        })?;
    if std::fs::metadata(directory)
        .map_err(|source| FileLoggerError::Open {
            path: directory.to_path_buf(),
            source,
        })?
        .is_dir()
    {
        Ok(())
    } else {
        Err(FileLoggerError::OutputBadDirectory(directory.to_path_buf()))
    }
}
