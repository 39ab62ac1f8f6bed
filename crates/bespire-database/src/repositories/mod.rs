//! Repository implementations, one per aggregate.

pub mod changelog;
pub mod file_entry;
pub mod lookup;
pub mod request;
pub mod tag;
