//! Core types and traits for tagkv
//!
//! This crate defines the foundational pieces used by the storage layer:
//! - KeyPart: Closed sum type for key components and values
//! - BigInt / Timestamp: Arbitrary-precision integers and millisecond instants
//! - codec: Self-delimiting, order-aware string encoding of KeyParts
//! - query: GetManyFilter / GetManyOptions for enumeration
//! - Traits: Backend (flat string store) and Storage (typed contract)
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bigint;
pub mod codec;
pub mod error;
pub mod query;
pub mod timestamp;
pub mod traits;
pub mod value;

pub use bigint::{BigInt, ParseBigIntError};
pub use codec::{decode, decode_key, encode, encode_key, CodecError};
pub use error::{Error, Result};
pub use query::{GetManyFilter, GetManyOptions};
pub use timestamp::Timestamp;
pub use traits::{Backend, Entries, Entry, Storage};
pub use value::{KeyPart, TypeTag};
