//! Storage layer
//!
//! Flat key-value storage of JSON documents.

mod kv;

pub use kv::{FileKvStore, KvStore, MemoryKvStore};
