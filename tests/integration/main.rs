//! HTTP integration tests.
//!
//! Tests that need PostgreSQL read `BESPIRE_TEST_DATABASE_URL` and return
//! early when it is unset; the remainder run against a lazily-connected
//! pool and never touch the database.

mod helpers;

mod file_test;
mod request_test;
mod tag_test;
mod trash_test;
mod upload_test;
