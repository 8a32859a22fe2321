//! DirectoryBackend: one file per entry
//!
//! A persistent [`Backend`] in the spirit of browser `localStorage` polyfills:
//! each entry is a file in a single directory.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   k<base64url(key)>      value text
//!   .k<base64url(key)>.tmp in-flight write
//! ```
//!
//! File names are `k` followed by the URL-safe, unpadded base64 of the key,
//! so any key (including the empty one) maps to a portable name. Temp files
//! start with `.` and are skipped during enumeration. Writes land in a temp
//! file and are renamed into place, so a reader never sees a half-written
//! value. Keys long enough to exceed the filesystem's name limit fail with
//! the underlying I/O error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::{info, warn};

use tagkv_core::{Backend, Result};

/// Leading character of every entry file name
const ENTRY_MARKER: char = 'k';

/// Persistent backend storing each entry as a file
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    /// Open (creating if needed) a backend rooted at `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!(target: "tagkv::backend", path = %root.display(), "Opened directory backend");
        Ok(Self { root })
    }

    /// Directory holding the entries
    pub fn path(&self) -> &Path {
        &self.root
    }

    fn file_name(key: &str) -> String {
        format!("{}{}", ENTRY_MARKER, URL_SAFE_NO_PAD.encode(key))
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.root.join(Self::file_name(key))
    }

    fn key_for(file_name: &str) -> Option<String> {
        let encoded = file_name.strip_prefix(ENTRY_MARKER)?;
        let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl Backend for DirectoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let name = Self::file_name(key);
        let tmp = self.root.join(format!(".{}.tmp", name));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.root.join(name))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.file_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        for key in self.keys()? {
            // A concurrent remove between listing and reading drops the entry.
            if let Some(value) = self.get_item(&key)? {
                entries.push((key, value));
            }
        }
        Ok(entries)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let file_name = dir_entry.file_name();
            let Some(name) = file_name.to_str() else {
                warn!(target: "tagkv::backend", file = ?file_name, "Ignoring non UTF-8 file name");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            match Self::key_for(name) {
                Some(key) => keys.push(key),
                None => {
                    warn!(target: "tagkv::backend", file = %name, "Ignoring file that is not an encoded key")
                }
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DirectoryBackend) {
        let temp_dir = TempDir::new().unwrap();
        let backend = DirectoryBackend::open(temp_dir.path().join("store")).unwrap();
        (temp_dir, backend)
    }

    #[test]
    fn test_open_creates_directory() {
        let (_temp, backend) = setup();
        assert!(backend.path().is_dir());
    }

    #[test]
    fn test_set_get_remove() {
        let (_temp, backend) = setup();
        backend.set_item("app$1:a!1", "#8000000000000000").unwrap();
        assert_eq!(
            backend.get_item("app$1:a!1").unwrap(),
            Some("#8000000000000000".to_string())
        );

        backend.remove_item("app$1:a!1").unwrap();
        assert_eq!(backend.get_item("app$1:a!1").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let (_temp, backend) = setup();
        backend.set_item("k", "one").unwrap();
        backend.set_item("k", "two").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), Some("two".to_string()));
        assert_eq!(backend.keys().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let (_temp, backend) = setup();
        assert!(backend.remove_item("missing").is_ok());
    }

    #[test]
    fn test_keys_with_path_characters() {
        let (_temp, backend) = setup();
        for key in ["a/b", "../escape", "", "é€"] {
            backend.set_item(key, key).unwrap();
        }
        let mut keys = backend.keys().unwrap();
        keys.sort();
        let mut expected = vec!["", "../escape", "a/b", "é€"];
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_entries_ignore_foreign_files() {
        let (_temp, backend) = setup();
        backend.set_item("k", "v").unwrap();
        fs::write(backend.path().join(".leftover.tmp"), "x").unwrap();
        fs::write(backend.path().join("notes.txt"), "x").unwrap();
        fs::write(backend.path().join("k!!"), "x").unwrap();
        fs::create_dir(backend.path().join("subdir")).unwrap();

        assert_eq!(
            backend.entries().unwrap(),
            vec![("k".to_string(), "v".to_string())]
        );
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let backend = DirectoryBackend::open(temp_dir.path()).unwrap();
            backend.set_item("durable", "yes").unwrap();
        }
        let reopened = DirectoryBackend::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.get_item("durable").unwrap(), Some("yes".to_string()));
    }
}
