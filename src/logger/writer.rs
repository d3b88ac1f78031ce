//! Log writer module
//!
//! Provides thread-safe log writing to append-only files.
//! Files can be reopened at runtime so external rotation works.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only log file that can be reopened in place
pub struct LogFile {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogFile {
    /// Open or create the file for appending
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_log_file(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line
    pub fn write_line(&self, message: &str) {
        if let Ok(mut f) = self.file.lock() {
            let _ = writeln!(f, "{message}");
        }
    }

    /// Reopen the file at the same path (after rotation)
    pub fn reopen(&self) -> io::Result<()> {
        let file = open_log_file(&self.path)?;
        if let Ok(mut current) = self.file.lock() {
            let _ = current.flush();
            *current = file;
        }
        Ok(())
    }
}

/// Console stream an entry is mirrored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Write message to the console
pub fn write_console(stream: ConsoleStream, message: &str) {
    match stream {
        ConsoleStream::Stdout => println!("{message}"),
        ConsoleStream::Stderr => eprintln!("{message}"),
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &Path) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parent_dirs_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/app.log");

        let log = LogFile::open(&path).unwrap();
        log.write_line("first");
        log.write_line("second");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_reopen_after_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let rotated = dir.path().join("app.log.1");

        let log = LogFile::open(&path).unwrap();
        log.write_line("before");
        std::fs::rename(&path, &rotated).unwrap();
        log.reopen().unwrap();
        log.write_line("after");

        assert_eq!(std::fs::read_to_string(&rotated).unwrap(), "before\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "after\n");
    }
}
