//! Core traits for backend and storage abstraction
//!
//! - [`Backend`]: the flat string-keyed store the adapter writes through.
//!   Implementations own their durability; this crate never retries.
//! - [`Storage`]: the typed contract a store adapter offers its caller.

use crate::error::Result;
use crate::query::{GetManyFilter, GetManyOptions};
use crate::value::KeyPart;

/// A decoded `(key, value)` pair yielded by enumeration
pub type Entry = (Vec<KeyPart>, KeyPart);

/// Boxed single-pass enumeration of entries
pub type Entries<'a> = Box<dyn Iterator<Item = Result<Entry>> + 'a>;

/// Flat, synchronous string key-value store
///
/// Thread safety: methods take `&self`; implementations synchronize
/// internally so one backend can be shared by many adapters.
pub trait Backend: Send + Sync {
    /// Read a value, `None` if absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Every stored entry, in no particular order
    fn entries(&self) -> Result<Vec<(String, String)>>;

    /// Every stored key, in no particular order
    ///
    /// Backends that can list keys without reading values should override this.
    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|(key, _)| key).collect())
    }
}

/// Typed storage contract implemented by store adapters
pub trait Storage: Send + Sync {
    /// Derive an independent namespace on the same backend
    ///
    /// `id` follows the same rule as a namespace prefix: non-empty ASCII
    /// letters and digits. Anything else fails with `Error::InvalidPrefix`,
    /// so an id can never introduce a codec tag into the derived prefix.
    fn branch(&self, id: &str) -> Result<Self>
    where
        Self: Sized;

    /// Prepare the store for use
    fn initialize(&self) -> Result<()>;

    /// Whether file/blob storage is available
    fn supports_files(&self) -> bool;

    /// Read the value under `key`
    fn get(&self, key: &[KeyPart]) -> Result<Option<KeyPart>>;

    /// Enumerate matching entries in encoded-key order
    fn get_many(&self, filter: GetManyFilter, options: GetManyOptions) -> Result<Entries<'_>>;

    /// Write `value` under `key`, or delete the entry when `value` is `None`
    fn set(&self, key: &[KeyPart], value: Option<KeyPart>) -> Result<()>;

    /// Add `amount` to the number under `key`, treating absent as zero
    fn increment(&self, key: &[KeyPart], amount: f64) -> Result<()>;
}
