//! Store configuration via TOML
//!
//! A `StoreConfig` names the namespace prefix and which backend to open.
//!
//! ```toml
//! prefix = "app"
//!
//! [backend]
//! kind = "directory"   # or "memory" (default)
//! path = ".tagkv"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tagkv_core::{Backend, Error, Result};

use crate::adapter::StorageAdapter;
use crate::directory::DirectoryBackend;
use crate::memory::MemoryBackend;

/// Directory used by a directory backend when no path is given
pub const DEFAULT_DIRECTORY: &str = ".tagkv";

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_DIRECTORY)
}

/// Which backend a store opens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Process-local [`MemoryBackend`]
    #[default]
    Memory,
    /// File-per-entry [`DirectoryBackend`]
    Directory {
        /// Directory holding the entries
        #[serde(default = "default_directory")]
        path: PathBuf,
    },
}

impl BackendConfig {
    /// Open the configured backend
    pub fn open(&self) -> Result<Arc<dyn Backend>> {
        Ok(match self {
            BackendConfig::Memory => Arc::new(MemoryBackend::new()),
            BackendConfig::Directory { path } => Arc::new(DirectoryBackend::open(path)?),
        })
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Namespace prefix, `[0-9A-Za-z]+`
    pub prefix: String,
    /// Backend selection
    #[serde(default)]
    pub backend: BackendConfig,
}

impl StoreConfig {
    /// In-memory store under `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            backend: BackendConfig::Memory,
        }
    }

    /// Use a directory backend at `path`
    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend = BackendConfig::Directory { path: path.into() };
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    ///
    /// `Error::Config` on malformed TOML or missing fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Open the backend and build an adapter over it
    pub fn open(&self) -> Result<StorageAdapter> {
        StorageAdapter::new(self.prefix.clone(), self.backend.open()?)
    }

    /// Commented template for a new config file
    pub fn default_toml() -> &'static str {
        r#"# tagkv store configuration
#
# Namespace prefix: letters and digits only
prefix = "app"

# Backend: "memory" (default, nothing persisted) or "directory"
[backend]
kind = "memory"
# kind = "directory"
# path = ".tagkv"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagkv_core::{key, KeyPart};
    use tempfile::TempDir;

    #[test]
    fn test_backend_defaults_to_memory() {
        let config = StoreConfig::from_toml_str("prefix = \"app\"").unwrap();
        assert_eq!(config, StoreConfig::new("app"));
    }

    #[test]
    fn test_parse_directory_backend() {
        let config = StoreConfig::from_toml_str(
            r#"
            prefix = "app"
            [backend]
            kind = "directory"
            path = "/var/lib/app"
            "#,
        )
        .unwrap();
        assert_eq!(config, StoreConfig::new("app").with_directory("/var/lib/app"));
    }

    #[test]
    fn test_directory_path_default() {
        let config = StoreConfig::from_toml_str(
            "prefix = \"app\"\n[backend]\nkind = \"directory\"\n",
        )
        .unwrap();
        assert_eq!(
            config.backend,
            BackendConfig::Directory {
                path: PathBuf::from(DEFAULT_DIRECTORY)
            }
        );
    }

    #[test]
    fn test_default_template_parses() {
        let config = StoreConfig::from_toml_str(StoreConfig::default_toml()).unwrap();
        assert_eq!(config.prefix, "app");
        assert_eq!(config.backend, BackendConfig::Memory);
    }

    #[test]
    fn test_parse_errors_are_config_errors() {
        for text in ["", "prefix = 1", "prefix = \"a\"\n[backend]\nkind = \"cloud\"\n"] {
            let err = StoreConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{:?}", text);
        }
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = StoreConfig::new("app").with_directory("data");
        let text = config.to_toml_string().unwrap();
        assert_eq!(StoreConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = StoreConfig::load(temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_open_invalid_prefix() {
        let err = StoreConfig::new("bad prefix").open().unwrap_err();
        assert!(matches!(err, Error::InvalidPrefix(_)));
    }

    #[test]
    fn test_load_and_open_directory_store() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let config_path = temp_dir.path().join("tagkv.toml");
        let config = StoreConfig::new("app").with_directory(&data_dir);
        fs::write(&config_path, config.to_toml_string().unwrap()).unwrap();

        let store = StoreConfig::load(&config_path).unwrap().open().unwrap();
        store.set(&key!["k"], Some(KeyPart::from(1))).unwrap();

        let reopened = StoreConfig::load(&config_path).unwrap().open().unwrap();
        assert_eq!(reopened.get(&key!["k"]).unwrap(), Some(KeyPart::from(1)));
        assert!(data_dir.is_dir());
    }
}
