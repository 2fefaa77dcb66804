//! Request DTOs with input validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cardhub_entity::client::{CreateClient, SocialLinks, WorkingHours};

/// Body of `POST /api/clients` (public submission form).
///
/// Field-shape validation happens here; policy validation (required
/// company, contact channel) happens in the service where the policy
/// configuration lives.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClientRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    /// Job title.
    #[validate(length(max = 200))]
    pub title: Option<String>,
    /// Primary phone number.
    #[validate(length(max = 40))]
    pub phone1: Option<String>,
    /// Secondary phone number.
    #[validate(length(max = 40))]
    pub phone2: Option<String>,
    /// Tertiary phone number.
    #[validate(length(max = 40))]
    pub phone3: Option<String>,
    /// Primary email address.
    #[validate(email(message = "Invalid email address"))]
    pub email1: Option<String>,
    /// Secondary email address.
    #[validate(email(message = "Invalid email address"))]
    pub email2: Option<String>,
    /// Tertiary email address.
    #[validate(email(message = "Invalid email address"))]
    pub email3: Option<String>,
    /// Company name.
    #[validate(length(max = 200))]
    pub company: Option<String>,
    /// Free-text biography.
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    /// Postal address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// Business website URL.
    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,
    /// Portfolio website URL.
    #[validate(url(message = "Invalid portfolio URL"))]
    pub portfolio: Option<String>,
    /// Location-map URL.
    #[validate(url(message = "Invalid map URL"))]
    pub map_url: Option<String>,
    /// Social-platform links.
    pub social: Option<SocialLinks>,
    /// Working hours.
    pub working_hours: Option<WorkingHours>,
}

impl From<CreateClientRequest> for CreateClient {
    fn from(req: CreateClientRequest) -> Self {
        Self {
            name: req.name,
            title: req.title,
            phone1: req.phone1,
            phone2: req.phone2,
            phone3: req.phone3,
            email1: req.email1,
            email2: req.email2,
            email3: req.email3,
            company: req.company,
            bio: req.bio,
            address: req.address,
            website: req.website,
            portfolio: req.portfolio,
            map_url: req.map_url,
            social: req.social,
            working_hours: req.working_hours,
        }
    }
}

/// Query parameters of `GET /api/clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListClientsParams {
    /// Free-text search over name, company, emails, and phones.
    pub q: Option<String>,
    /// Exact status filter.
    pub status: Option<String>,
}

/// Query parameters of `GET /api/clients/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GetClientParams {
    /// Join the client's recent audit entries into the response.
    #[serde(default)]
    pub include_audit: bool,
}

/// Body of status changes and soft deletes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusChangeRequest {
    /// Why the status is changing. Minimum length is enforced by the
    /// lifecycle policy in the service.
    pub notes: String,
}

/// Query parameters of `GET /api/audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditListParams {
    /// Restrict to entries targeting one client.
    pub client_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_email_is_rejected() {
        let req = CreateClientRequest {
            name: "Jane Doe".into(),
            title: None,
            phone1: None,
            phone2: None,
            phone3: None,
            email1: Some("not-an-email".into()),
            email2: None,
            email3: None,
            company: Some("Acme".into()),
            bio: None,
            address: None,
            website: None,
            portfolio: None,
            map_url: None,
            social: None,
            working_hours: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn minimal_valid_request_passes() {
        let req: CreateClientRequest = serde_json::from_str(
            r#"{"name": "Jane Doe", "company": "Acme", "email1": "jane@example.com"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
