//! tagkv - typed, order-aware key-value storage over flat string stores
//!
//! tagkv turns composite keys made of typed parts (booleans, numbers,
//! strings, big integers, dates, bytes and nested arrays) into plain strings,
//! so any string-keyed store can hold them, and scans the store by key
//! prefix or per-position range.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tagkv::{key, GetManyFilter, GetManyOptions, KeyPart, MemoryBackend, StorageAdapter};
//!
//! let store = StorageAdapter::new("app", Arc::new(MemoryBackend::new()))?;
//!
//! store.set(&key!["user", 1], Some(KeyPart::from("alice")))?;
//! store.set(&key!["user", 2], Some(KeyPart::from("bob")))?;
//! store.increment(&key!["visits"], 1.0)?;
//!
//! let users: Vec<_> = store
//!     .get_many(GetManyFilter::prefix(key!["user"]), GetManyOptions::new())?
//!     .collect::<tagkv::Result<_>>()?;
//! assert_eq!(users.len(), 2);
//! # Ok::<(), tagkv::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `tagkv-core`: [`KeyPart`], the [`codec`], query filters, the
//!   [`Backend`] and [`Storage`] traits, and [`Error`].
//! - `tagkv-storage`: [`StorageAdapter`], [`MemoryBackend`],
//!   [`DirectoryBackend`] and [`StoreConfig`].

pub use tagkv_core::{
    codec, key, BigInt, Backend, CodecError, Entries, Entry, Error, GetManyFilter, GetManyOptions,
    KeyPart, ParseBigIntError, Result, Storage, Timestamp, TypeTag,
};
pub use tagkv_storage::{
    BackendConfig, DirectoryBackend, GetMany, MemoryBackend, StorageAdapter, StoreConfig,
    BRANCH_SEPARATOR, DEFAULT_DIRECTORY,
};
