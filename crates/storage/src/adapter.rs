//! StorageAdapter: typed keys and values over a flat string backend
//!
//! ## Design
//!
//! StorageAdapter is a stateless facade over a [`Backend`]. It holds a
//! namespace prefix and an `Arc` to the backend, nothing else.
//!
//! ## Namespacing
//!
//! Every backend key is `prefix + encode_key(parts)`. The prefix is
//! `[0-9A-Za-z]+` and codec tags are never alphanumeric, so once a prefix
//! is stripped an entry that belongs to another namespace (a longer sibling
//! prefix, or a branch) no longer starts with a tag and is skipped.
//!
//! ## Enumeration
//!
//! [`StorageAdapter::get_many`] snapshots the matching key names once, sorted
//! by encoded key. Values are fetched one by one as the returned [`GetMany`]
//! advances; a key removed in the meantime is skipped. The iterator is
//! single-pass. Dropping it early releases nothing but its key list.
//!
//! ## Concurrency
//!
//! `increment` is read-modify-write without locking. Two concurrent
//! increments of the same key can lose an update.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::{debug, trace};

use tagkv_core::codec::{self, decode_key, encode_key};
use tagkv_core::{
    Backend, Entries, Entry, Error, GetManyFilter, GetManyOptions, KeyPart, Result, Storage,
};

/// Separator inserted between a parent prefix and a branch id
pub const BRANCH_SEPARATOR: &str = "S__";

/// Namespaced, typed key-value store over a shared backend
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tagkv_core::{key, KeyPart};
/// use tagkv_storage::{MemoryBackend, StorageAdapter};
///
/// let store = StorageAdapter::new("app", Arc::new(MemoryBackend::new())).unwrap();
/// store.set(&key!["users", 1], Some(KeyPart::from("alice"))).unwrap();
/// assert_eq!(store.get(&key!["users", 1]).unwrap(), Some(KeyPart::from("alice")));
/// ```
#[derive(Clone)]
pub struct StorageAdapter {
    prefix: String,
    backend: Arc<dyn Backend>,
}

impl fmt::Debug for StorageAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageAdapter")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Reject anything but a non-empty `[0-9A-Za-z]+` string
fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(Error::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

impl StorageAdapter {
    /// Create an adapter over `backend` under namespace `prefix`
    ///
    /// # Errors
    ///
    /// `Error::InvalidPrefix` if `prefix` is empty or not alphanumeric.
    pub fn new(prefix: impl Into<String>, backend: Arc<dyn Backend>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { prefix, backend })
    }

    /// Namespace prefix of this adapter
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Shared backend handle
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// New adapter on the same backend under `prefix + "S__" + id`
    ///
    /// No data is copied. `id` must be alphanumeric like a prefix; the
    /// derived prefix itself contains `_` and is not re-validated.
    pub fn branch(&self, id: &str) -> Result<Self> {
        validate_prefix(id)?;
        let prefix = format!("{}{}{}", self.prefix, BRANCH_SEPARATOR, id);
        debug!(target: "tagkv::adapter", parent = %self.prefix, branch = %prefix, "Branched namespace");
        Ok(Self {
            prefix,
            backend: Arc::clone(&self.backend),
        })
    }

    /// Backend key for a key tuple
    fn storage_key(&self, key: &[KeyPart]) -> String {
        let mut storage_key = self.prefix.clone();
        storage_key.push_str(&encode_key(key));
        storage_key
    }

    /// Get the value stored under `key`, `None` if absent
    pub fn get(&self, key: &[KeyPart]) -> Result<Option<KeyPart>> {
        match self.backend.get_item(&self.storage_key(key))? {
            Some(raw) => Ok(Some(codec::decode(&raw)?)),
            None => Ok(None),
        }
    }

    /// Write `value` under `key`; `None` deletes the entry instead
    pub fn set(&self, key: &[KeyPart], value: Option<KeyPart>) -> Result<()> {
        let storage_key = self.storage_key(key);
        match value {
            Some(value) => {
                debug!(target: "tagkv::adapter", key = %storage_key, "set");
                self.backend.set_item(&storage_key, &codec::encode(&value))
            }
            None => {
                debug!(target: "tagkv::adapter", key = %storage_key, "delete");
                self.backend.remove_item(&storage_key)
            }
        }
    }

    /// Add `amount` to the number under `key` (absent counts as 0)
    ///
    /// # Errors
    ///
    /// `Error::TypeMismatch` if the stored value is not a Number.
    pub fn increment(&self, key: &[KeyPart], amount: f64) -> Result<()> {
        let current = match self.get(key)? {
            None => 0.0,
            Some(KeyPart::Number(n)) => n,
            Some(other) => {
                return Err(Error::TypeMismatch {
                    expected: "Number",
                    actual: other.type_name(),
                })
            }
        };
        self.set(key, Some(KeyPart::Number(current + amount)))
    }

    /// Enumerate entries matching `filter`, in encoded-key order
    ///
    /// The set of candidate keys is fixed when this is called.
    pub fn get_many(&self, filter: GetManyFilter, options: GetManyOptions) -> Result<GetMany> {
        let mut keys: Vec<String> = self
            .backend
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect();
        // Shared prefix: ordering full keys orders the encoded keys.
        keys.sort_unstable();
        if options.reverse {
            keys.reverse();
        }

        Ok(GetMany {
            backend: Arc::clone(&self.backend),
            prefix_len: self.prefix.len(),
            keys: keys.into_iter(),
            filter,
            remaining: options.effective_limit(),
        })
    }
}

/// Single-pass iterator returned by [`StorageAdapter::get_many`]
///
/// Yields `Err` for backend failures without ending the iteration. Entries
/// whose key or value does not decode are skipped and never count toward
/// the limit.
pub struct GetMany {
    backend: Arc<dyn Backend>,
    prefix_len: usize,
    keys: std::vec::IntoIter<String>,
    filter: GetManyFilter,
    remaining: Option<usize>,
}

impl fmt::Debug for GetMany {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetMany")
            .field("pending_keys", &self.keys.len())
            .field("filter", &self.filter)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl Iterator for GetMany {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }

        for storage_key in self.keys.by_ref() {
            let parts = match decode_key(&storage_key[self.prefix_len..]) {
                Ok(parts) => parts,
                Err(e) => {
                    trace!(target: "tagkv::adapter", key = %storage_key, error = %e, "Skipping undecodable key");
                    continue;
                }
            };
            if !self.filter.matches(&parts) {
                continue;
            }

            let raw = match self.backend.get_item(&storage_key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            };
            let value = match codec::decode(&raw) {
                Ok(value) => value,
                Err(e) => {
                    trace!(target: "tagkv::adapter", key = %storage_key, error = %e, "Skipping undecodable value");
                    continue;
                }
            };
            if let Some(remaining) = self.remaining.as_mut() {
                *remaining -= 1;
            }
            return Some(Ok((parts, value)));
        }
        None
    }
}

impl FusedIterator for GetMany {}

impl Storage for StorageAdapter {
    fn branch(&self, id: &str) -> Result<Self> {
        StorageAdapter::branch(self, id)
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn supports_files(&self) -> bool {
        false
    }

    fn get(&self, key: &[KeyPart]) -> Result<Option<KeyPart>> {
        StorageAdapter::get(self, key)
    }

    fn get_many(&self, filter: GetManyFilter, options: GetManyOptions) -> Result<Entries<'_>> {
        Ok(Box::new(StorageAdapter::get_many(self, filter, options)?))
    }

    fn set(&self, key: &[KeyPart], value: Option<KeyPart>) -> Result<()> {
        StorageAdapter::set(self, key, value)
    }

    fn increment(&self, key: &[KeyPart], amount: f64) -> Result<()> {
        StorageAdapter::increment(self, key, amount)
    }
}
