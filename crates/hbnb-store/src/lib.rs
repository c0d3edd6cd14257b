//! Object store for the HBNB console.
//!
//! The store keeps every live [`Entity`](hbnb_types::Entity) in one ordered
//! map keyed by [`EntityKey`](hbnb_types::EntityKey) and persists the whole
//! map as a single JSON document on explicit [`save`](Storage::save).
//!
//! # Storage Backends
//!
//! All backends implement the [`Storage`] trait:
//!
//! - [`FileStorage`] -- JSON file at a fixed path
//! - [`InMemoryStorage`] -- no persistence, for tests and embedding
//!
//! # Design Rules
//!
//! 1. Every key is derived from its entity's kind and identity.
//! 2. One in-memory instance per key; inserting under an existing key
//!    replaces the previous instance.
//! 3. Nothing is written until `save()`; `save()` rewrites the whole file.
//! 4. A missing or empty file reloads as an empty store.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::{FileStorage, DEFAULT_FILE};
pub use memory::InMemoryStorage;
pub use traits::{Objects, ReloadReport, Storage};
