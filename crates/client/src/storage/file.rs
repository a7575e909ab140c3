//! File-backed storage.
//!
//! Each slot is a file named after its key. Writes land in a hidden temp file
//! first and are renamed into place, so an interrupted write leaves either
//! the old value or the new one under the slot name.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{Storage, StorageError};

/// [`Storage`] keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The backing directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

/// Keys become file names: ASCII alphanumerics plus `_`, `-` and `.`, never
/// starting with a dot (reserved for temp files).
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let path = match self.slot_path(key) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Ignoring read of unrepresentable key");
                return None;
            }
        };

        match fs::read(&path) {
            // Lossy decoding hands damaged bytes to the caller's own recovery
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read storage slot");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested")).unwrap();

        assert_eq!(storage.get_item("shop_front_auth"), None);
        storage.set_item("shop_front_auth", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get_item("shop_front_auth").as_deref(),
            Some("{\"a\":1}")
        );

        storage.remove_item("shop_front_auth").unwrap();
        assert_eq!(storage.get_item("shop_front_auth"), None);
        storage.remove_item("shop_front_auth").unwrap();
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set_item("slot", "v").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["slot".to_string()]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(matches!(
                storage.set_item(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
            assert_eq!(storage.get_item(key), None);
        }
    }

    #[test]
    fn test_invalid_utf8_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        fs::write(dir.path().join("slot"), [b'{', 0xff, b'}']).unwrap();

        let raw = storage.get_item("slot").unwrap();
        assert!(raw.starts_with('{'));
        assert!(raw.ends_with('}'));
    }
}
