//! Repository implementations over the sqlx pool.

pub mod audit;
pub mod client;

pub use audit::AuditLogRepository;
pub use client::ClientRepository;
