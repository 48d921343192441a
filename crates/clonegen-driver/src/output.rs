//! Write-only-if-changed persistence.

use std::fs;
use std::io;
use std::path::Path;

/// Result of a [`write_if_changed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// Existing content already matches; nothing was written.
    UpToDate,
    /// Content differed (or the file was missing) and was written.
    Overwritten,
}

/// Compare `text` against the current content of `path` and overwrite only
/// on difference. The comparison is exact and textual; callers keep their
/// `\n` line endings because the file is written as raw bytes.
pub fn write_if_changed(text: &str, path: &Path) -> io::Result<WriteStatus> {
    let old = match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    if old.as_deref() == Some(text) {
        return Ok(WriteStatus::UpToDate);
    }

    fs::write(path, text)?;
    Ok(WriteStatus::Overwritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.autogen.h");

        let status = write_if_changed("generated\n", &path).unwrap();
        assert_eq!(status, WriteStatus::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), "generated\n");
    }

    #[test]
    fn test_identical_content_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.autogen.h");
        fs::write(&path, "generated\n").unwrap();

        let status = write_if_changed("generated\n", &path).unwrap();
        assert_eq!(status, WriteStatus::UpToDate);
    }

    #[test]
    fn test_changed_content_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.autogen.h");
        fs::write(&path, "stale\n").unwrap();

        let status = write_if_changed("generated\n", &path).unwrap();
        assert_eq!(status, WriteStatus::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), "generated\n");
    }
}
