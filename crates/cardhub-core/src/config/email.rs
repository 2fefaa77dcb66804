//! Outbound SMTP email configuration.

use serde::{Deserialize, Serialize};

/// SMTP email delivery configuration.
///
/// Delivery is disabled when `smtp_host` is empty; every send is
/// best-effort and never fails the triggering business operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmailConfig {
    /// SMTP server hostname. Empty disables email delivery.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP server port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Optional SMTP username.
    #[serde(default)]
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// Address notified when a new client record is submitted.
    #[serde(default)]
    pub admin_address: Option<String>,
}

impl EmailConfig {
    /// Whether email delivery is configured at all.
    pub fn is_enabled(&self) -> bool {
        !self.smtp_host.is_empty()
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@cardhub.local".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_host_disables_delivery() {
        let config = EmailConfig::default();
        assert!(!config.is_enabled());
    }
}
