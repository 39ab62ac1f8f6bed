//! Request updates and changelog reads.

pub mod service;

pub use service::{ChangelogEntryView, NamedRef, RequestService};
