//! Workspace tag vocabulary.

pub mod model;

pub use model::{CreateTag, Tag};
