//! # cardhub-database
//!
//! PostgreSQL access layer for CardHub: connection pool management,
//! migration runner, and repositories for the `clients` and `audit_log`
//! tables.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
