//! Workspace tag vocabulary.

pub mod service;

pub use service::TagService;
