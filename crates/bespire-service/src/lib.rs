//! # bespire-service
//!
//! Business logic service layer for Bespire. Each service orchestrates
//! repositories and the object store to implement application-level use
//! cases for the workspace file library and request changelog.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod request;
pub mod tag;

pub use context::Principal;
pub use file::{BulkOutcome, FileEntryService, TrashService, UploadService};
pub use request::{ChangelogEntryView, NamedRef, RequestService};
pub use tag::TagService;
