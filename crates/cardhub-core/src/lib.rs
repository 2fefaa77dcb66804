//! # cardhub-core
//!
//! Core crate for CardHub. Contains configuration schemas, pagination and
//! response-envelope types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CardHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
