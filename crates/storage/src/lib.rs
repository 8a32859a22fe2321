//! Storage layer for tagkv
//!
//! This crate implements the store adapter and the backends it runs on:
//! - StorageAdapter: namespaced typed get/set/increment/get_many
//! - MemoryBackend: HashMap-based backend with RwLock
//! - DirectoryBackend: one file per entry, survives restarts
//! - StoreConfig: TOML configuration selecting prefix and backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod config;
pub mod directory;
pub mod memory;

pub use adapter::{GetMany, StorageAdapter, BRANCH_SEPARATOR};
pub use config::{BackendConfig, StoreConfig, DEFAULT_DIRECTORY};
pub use directory::DirectoryBackend;
pub use memory::MemoryBackend;
