//! # cardhub-api
//!
//! HTTP API layer for CardHub built on Axum.
//!
//! Provides all REST endpoints, middleware (rate limiting, CORS,
//! compression, request tracing), extractors, DTOs, and the mapping
//! from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use state::AppState;
