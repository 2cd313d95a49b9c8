//! # Record Store
//!
//! Keeps the most recent patients so a slip can be regenerated without
//! retyping. The store is small on purpose: at most [`DEFAULT_CAPACITY`]
//! records, one per patient name, newest `date` first.
//!
//! ## Layers
//!
//! - [`StorageBackend`]: raw persistence of a whole record sequence.
//!   - [`fs_backend::FsBackend`]: a CSV file, written atomically (temp file + rename).
//!   - [`mem_backend::MemBackend`]: in-memory, with simulated failures, for tests.
//! - [`RecordStore`]: the business rules (dedup, eviction, ordering, search)
//!   over any backend.
//! - [`codec`]: the CSV row format shared by backends that write files.
//!
//! ## Lifecycle
//!
//! The backing file is read lazily, on the first operation that needs it.
//! A failed save marks the store [`StoreState::Invalid`] and leaves memory
//! as it was before the call; the next operation rereads the file. A load
//! failure never leaves a partially loaded store behind.
//!
//! ## Identity
//!
//! Two records belong to the same patient when their names match after
//! trimming and lowercasing (see [`crate::model::normalize_name`]).

pub mod backend;
pub mod codec;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::StorageBackend;
pub use record_store::{RecordStore, StoreState, DEFAULT_CAPACITY};
