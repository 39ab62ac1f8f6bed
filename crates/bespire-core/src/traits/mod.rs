//! Trait seams implemented by other Bespire crates.

pub mod object_store;

pub use object_store::{ObjectStore, ObjectUpload, StoredObject};
