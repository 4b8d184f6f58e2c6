//! Atomic file replacement.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Directory the temp file for `path` is created in, so the final rename
/// never crosses filesystems. Bare file names resolve to the working
/// directory.
pub fn staging_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Replaces `path` with `contents`, creating parent directories as needed.
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = staging_dir(path);
    fs::create_dir_all(dir)?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.as_file_mut().sync_all()?;
    temp_file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn bare_file_names_stage_in_working_directory() {
        assert_eq!(staging_dir(Path::new("prefs.toml")), Path::new("."));
        assert_eq!(
            staging_dir(Path::new("data/prefs.toml")),
            Path::new("data")
        );
        assert_eq!(staging_dir(Path::new("/prefs.toml")), Path::new("/"));
    }

    #[test]
    fn creates_parents_and_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("file.toml");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn failed_replace_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();

        assert!(write_atomic(&path, "data").is_err());
        assert!(path.is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
