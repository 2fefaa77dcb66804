//! Single-slot admission gate for PDF rendering.
//!
//! Headless-browser renders are memory-heavy, so at most one runs at a
//! time. Callers wait a bounded window for the slot; when it does not
//! free up in time they get a busy error rather than queuing behind an
//! unbounded backlog.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use cardhub_core::error::AppError;
use cardhub_core::result::AppResult;

/// The render admission gate. Cheap to clone; all clones share the slot.
#[derive(Debug, Clone)]
pub struct RenderGate {
    slot: Arc<Semaphore>,
    admission_wait: Duration,
}

/// An admitted render slot. Dropping it releases the gate, including on
/// panic or early return.
#[derive(Debug)]
pub struct RenderSlot {
    _permit: tokio::sync::OwnedSemaphorePermit,
}

impl RenderGate {
    pub fn new(admission_wait: Duration) -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
            admission_wait,
        }
    }

    /// Wait up to the admission window for the render slot.
    pub async fn admit(&self) -> AppResult<RenderSlot> {
        let acquire = Arc::clone(&self.slot).acquire_owned();
        match tokio::time::timeout(self.admission_wait, acquire).await {
            Ok(Ok(permit)) => {
                debug!("Render slot admitted");
                Ok(RenderSlot { _permit: permit })
            }
            Ok(Err(_closed)) => Err(AppError::internal("Render gate semaphore closed")),
            Err(_elapsed) => Err(AppError::busy(
                "A PDF render is already in progress, try again shortly",
            )),
        }
    }

    /// Whether the slot is currently free.
    pub fn is_idle(&self) -> bool {
        self.slot.available_permits() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardhub_core::error::ErrorKind;

    #[tokio::test]
    async fn second_admission_times_out_while_slot_held() {
        let gate = RenderGate::new(Duration::from_millis(50));
        let held = gate.admit().await.unwrap();
        assert!(!gate.is_idle());

        let err = gate.admit().await.expect_err("slot is held");
        assert_eq!(err.kind, ErrorKind::Busy);

        drop(held);
        assert!(gate.is_idle());
    }

    #[tokio::test]
    async fn waiter_is_admitted_when_slot_frees_in_time() {
        let gate = RenderGate::new(Duration::from_secs(5));
        let held = gate.admit().await.unwrap();

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.admit().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(held);

        let slot = waiter.await.unwrap();
        assert!(slot.is_ok());
    }

    #[tokio::test]
    async fn drop_releases_even_across_clones() {
        let gate = RenderGate::new(Duration::from_millis(10));
        let clone = gate.clone();

        let slot = clone.admit().await.unwrap();
        assert!(gate.admit().await.is_err());
        drop(slot);
        assert!(gate.admit().await.is_ok());
    }
}
