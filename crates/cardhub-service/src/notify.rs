//! Best-effort email notifications over SMTP.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use cardhub_core::config::email::EmailConfig;
use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::result::AppResult;
use cardhub_entity::client::Client;

/// Sends lifecycle notification emails.
///
/// Delivery is disabled entirely when no SMTP host is configured; every
/// send is best-effort and callers downgrade failures to warnings.
pub struct Notifier {
    config: EmailConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl Notifier {
    pub fn new(config: EmailConfig) -> AppResult<Self> {
        let transport = if config.is_enabled() {
            let mut builder =
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Email, "Invalid SMTP relay host", e)
                    })?
                    .port(config.smtp_port);

            if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
                builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
            }

            Some(builder.build())
        } else {
            None
        };

        Ok(Self { config, transport })
    }

    /// Whether any email will ever be sent.
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Notify the admin address that a new card was submitted.
    pub async fn notify_admin_new_client(&self, client: &Client) -> AppResult<()> {
        let Some(admin) = self.config.admin_address.clone() else {
            debug!("No admin address configured, skipping submission notification");
            return Ok(());
        };
        let subject = format!("[CardHub] New card submission: {}", client.name);
        let body = format!(
            "A new business card was submitted.\n\nName: {}\nCompany: {}\nSlug: {}\nSubmitted: {}\n",
            client.name,
            client.company.as_deref().unwrap_or("-"),
            client.slug,
            client.created_at.to_rfc3339(),
        );
        self.send(&admin, &subject, body).await
    }

    /// Notify the card owner that their card is live.
    pub async fn notify_client_card_ready(
        &self,
        client: &Client,
        public_url: &str,
    ) -> AppResult<()> {
        let Some(email) = client.email1.clone() else {
            debug!(client_id = %client.id, "Client has no email address, skipping notification");
            return Ok(());
        };
        let subject = "[CardHub] Your digital business card is ready".to_string();
        let body = format!(
            "Hello {},\n\nYour digital business card is now live:\n{}\n\nYour contact card (vCard) and QR code are available on that page.\n",
            client.name, public_url,
        );
        self.send(&email, &subject, body).await
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            debug!("Email delivery disabled, skipping send");
            return Ok(());
        };

        let message = Message::builder()
            .from(self.config.from_address.parse().map_err(|e| {
                AppError::with_source(ErrorKind::Email, "Invalid sender address", e)
            })?)
            .to(to
                .parse()
                .map_err(|e| AppError::with_source(ErrorKind::Email, "Invalid recipient", e))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::with_source(ErrorKind::Email, "Failed to build email", e))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Email, "SMTP send failed", e))?;

        info!(to, subject, "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_smtp_host() {
        let notifier = Notifier::new(EmailConfig::default()).unwrap();
        assert!(!notifier.is_enabled());
    }

    #[tokio::test]
    async fn disabled_notifier_sends_are_noops() {
        let notifier = Notifier::new(EmailConfig::default()).unwrap();
        let result = notifier.send("someone@example.com", "s", "b".into()).await;
        assert!(result.is_ok());
    }
}
