//! On-demand PDF delivery through the render gate.

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use cardhub_core::result::AppResult;
use cardhub_entity::client::{Client, HistoryEntry};
use cardhub_media::ArtifactKind;

use super::service::ClientService;

impl ClientService {
    /// Fetch a client's PDF, rendering it on demand.
    ///
    /// The stored artifact is preferred; only when fetching it fails
    /// (or none exists yet) is a fresh render attempted. The render
    /// gate guards the whole operation so fetch traffic of a PDF being
    /// regenerated cannot interleave with the render.
    pub async fn fetch_pdf(&self, id: Uuid, actor: &str) -> AppResult<Bytes> {
        let mut client = self.get(id).await?;

        let _slot = self.gate.admit().await?;

        if let Some(url) = client.pdf_url.clone() {
            match self.media.fetch(&url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) => {
                    warn!(client_id = %id, url, error = %e, "Stored PDF unavailable, regenerating");
                }
            }
        }

        self.render_and_store_pdf(&mut client).await?;
        client
            .history
            .0
            .push(HistoryEntry::now("pdf generated", actor, None));
        client.updated_at = Utc::now();
        self.repo.update(&client).await?;

        self.audit.record(
            actor,
            "client.pdf_generated",
            Some(id),
            None,
            Some(serde_json::json!({ "on_demand": true })),
        );

        // render_and_store_pdf stored the fresh bytes; read them back
        // through the store so the served copy is the persisted one.
        let url = client
            .pdf_url
            .clone()
            .ok_or_else(|| cardhub_core::AppError::internal("PDF URL missing after render"))?;
        self.media.fetch(&url).await
    }

    /// Best-effort render at creation time, when enabled.
    pub(crate) async fn generate_initial_pdf(
        &self,
        client: &mut Client,
        actor: &str,
    ) -> AppResult<()> {
        let _slot = self.gate.admit().await?;
        self.render_and_store_pdf(client).await?;
        client
            .history
            .0
            .push(HistoryEntry::now("pdf generated", actor, None));
        client.updated_at = Utc::now();
        self.repo.update(client).await?;

        self.audit.record(
            actor,
            "client.pdf_generated",
            Some(client.id),
            None,
            Some(serde_json::json!({ "on_demand": false })),
        );
        Ok(())
    }

    /// Render the profile to PDF and persist it, updating `pdf_url`.
    ///
    /// Does not touch history or audit; callers decide how to record
    /// the event (creation-time renders and on-demand renders are
    /// logged differently).
    pub(crate) async fn render_and_store_pdf(&self, client: &mut Client) -> AppResult<()> {
        let public_url = self.public_url_for(&client.slug);
        let pdf = self.renderer.render_pdf(client, &public_url).await?;
        let url = self.media.upload(ArtifactKind::Pdf, client.id, pdf).await?;
        info!(client_id = %client.id, url, "PDF rendered and stored");
        client.pdf_url = Some(url);
        Ok(())
    }
}
