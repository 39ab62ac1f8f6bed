//! # bespire-entity
//!
//! Domain entity models for Bespire. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`; rows additionally implement
//! `sqlx::FromRow` (manually where a column maps to a tagged state).

pub mod file_entry;
pub mod request;
pub mod tag;
