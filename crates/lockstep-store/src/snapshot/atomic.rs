//! Atomic file writes for snapshot publish
//!
//! A crashed publish must never leave a truncated authoritative object, so
//! content lands in a sibling temp file first and reaches the target path
//! only through rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `content` to `target_path` via a temp file and rename
///
/// Creates parent directories as needed. The temp file lives next to the
/// target so the rename stays on one filesystem.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(target_path);
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, target_path)?;

    Ok(())
}

/// Sibling temp path: the full target name with ".tmp" appended
///
/// Appended, not substituted, so "database.db" and "database.tmp" never
/// share a temp file.
fn temp_path(target_path: &Path) -> PathBuf {
    let mut name = target_path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("object.db");

        atomic_write(&target, b"content").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"content");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("deeper").join("object.db");

        atomic_write(&target, b"content").unwrap();

        assert!(target.exists());
    }

    #[test]
    fn test_no_tmp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("object.db");

        atomic_write(&target, b"one").unwrap();
        atomic_write(&target, b"two").unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map(|ext| ext == "tmp").unwrap_or(false))
            .collect();
        assert!(
            leftovers.is_empty(),
            "temp files left behind: {:?}",
            leftovers
        );
        assert_eq!(fs::read(&target).unwrap(), b"two");
    }

    #[test]
    fn test_temp_name_appends_suffix() {
        let tmp = temp_path(Path::new("snapshots/database.db"));
        assert_eq!(tmp, PathBuf::from("snapshots/database.db.tmp"));
    }
}
