//! Service requests and their append-only changelog.

pub mod changelog;
pub mod model;

pub use changelog::{NewRequestSnapshot, RequestSnapshot, changed_fields};
pub use model::{CreateRequest, Request, RequestPatch, RequestPriority, RequestStatus};
