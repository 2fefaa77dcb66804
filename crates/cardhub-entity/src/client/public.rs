//! Public-safe projection of a client record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Client, SocialLinks, WorkingHours};

/// Reduced field set returned by public profile endpoints.
///
/// Excludes status, history, and internal timestamps; disabled and
/// deleted records are filtered out before this projection is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProfile {
    /// Client identifier.
    pub id: Uuid,
    /// Profile slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub title: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Primary phone number.
    pub phone: Option<String>,
    /// Primary email address.
    pub email: Option<String>,
    /// Business website URL.
    pub website: Option<String>,
    /// Portfolio website URL.
    pub portfolio: Option<String>,
    /// Location-map URL.
    pub map_url: Option<String>,
    /// Social links.
    pub social: SocialLinks,
    /// Working hours.
    pub working_hours: WorkingHours,
    /// Profile photo URL.
    pub photo_url: Option<String>,
    /// vCard file URL.
    pub vcard_url: Option<String>,
    /// QR code image URL.
    pub qr_code_url: Option<String>,
}

impl From<&Client> for PublicProfile {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            slug: client.slug.clone(),
            name: client.name.clone(),
            title: client.title.clone(),
            company: client.company.clone(),
            bio: client.bio.clone(),
            address: client.address.clone(),
            phone: client.phone1.clone(),
            email: client.email1.clone(),
            website: client.website.clone(),
            portfolio: client.portfolio.clone(),
            map_url: client.map_url.clone(),
            social: client.social.0.clone(),
            working_hours: client.working_hours.0.clone(),
            photo_url: client.photo_url.clone(),
            vcard_url: client.vcard_url.clone(),
            qr_code_url: client.qr_code_url.clone(),
        }
    }
}
