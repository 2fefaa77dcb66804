//! Client lifecycle service.
//!
//! Split by concern: CRUD and queries in `service`, artifact generation
//! in `artifacts`, status transitions in `status`, on-demand PDF
//! delivery in `pdf`. All operations hang off [`ClientService`].

pub mod artifacts;
pub mod pdf;
pub mod service;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use service::ClientService;
