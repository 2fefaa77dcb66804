//! # cardhub-service
//!
//! Business-logic layer: the client lifecycle service plus the audit
//! recorder and email notifier it depends on. Handlers in
//! `cardhub-api` call into this crate; nothing here knows about HTTP.

pub mod audit;
pub mod client;
pub mod completed;
pub mod notify;
pub mod store;

pub use audit::AuditRecorder;
pub use client::ClientService;
pub use completed::Completed;
pub use notify::Notifier;
pub use store::{AuditStore, ClientStore};
