//! # bespire-database
//!
//! PostgreSQL connection management, migrations, and repository
//! implementations for Bespire. Repositories own all SQL; services never
//! see a pool directly.

pub mod connection;
pub mod migration;
pub mod repositories;
