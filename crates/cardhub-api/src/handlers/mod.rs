//! HTTP request handlers, grouped by surface.

pub mod audit;
pub mod client;
pub mod health;
pub mod public;
