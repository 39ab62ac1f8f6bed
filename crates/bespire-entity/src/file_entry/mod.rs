//! The unified file-or-folder entity and its lifecycle.

pub mod lifecycle;
pub mod model;
pub mod patch;

pub use lifecycle::Lifecycle;
pub use model::{AccessLabel, CreateFileEntry, EntryKind, FileEntry};
pub use patch::FileEntryPatch;
