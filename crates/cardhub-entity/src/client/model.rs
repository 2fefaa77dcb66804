//! Client entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::history::HistoryEntry;
use super::status::ClientStatus;

/// Named social-platform links. Fixed schema, partial population allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// LinkedIn profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Twitter/X profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Instagram profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    /// Facebook profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    /// YouTube channel URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// GitHub profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl SocialLinks {
    /// Merge `other` onto `self` key-by-key. Fields absent from `other`
    /// survive unchanged; a patch never replaces the whole object.
    pub fn merge_from(&mut self, other: SocialLinks) {
        if other.linkedin.is_some() {
            self.linkedin = other.linkedin;
        }
        if other.twitter.is_some() {
            self.twitter = other.twitter;
        }
        if other.instagram.is_some() {
            self.instagram = other.instagram;
        }
        if other.facebook.is_some() {
            self.facebook = other.facebook;
        }
        if other.youtube.is_some() {
            self.youtube = other.youtube;
        }
        if other.github.is_some() {
            self.github = other.github;
        }
    }
}

/// Working-hours ranges per day group. Fixed schema, partial population
/// allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    /// Monday through Friday (e.g. `"09:00-17:00"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<String>,
    /// Saturday hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    /// Sunday hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday: Option<String>,
}

impl WorkingHours {
    /// Merge `other` onto `self` key-by-key (see [`SocialLinks::merge_from`]).
    pub fn merge_from(&mut self, other: WorkingHours) {
        if other.weekdays.is_some() {
            self.weekdays = other.weekdays;
        }
        if other.saturday.is_some() {
            self.saturday = other.saturday;
        }
        if other.sunday.is_some() {
            self.sunday = other.sunday;
        }
    }
}

/// A business-card profile record owned by one end customer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Unique client identifier.
    pub id: Uuid,
    /// URL-safe unique identifier derived from the display name.
    /// Immutable once assigned.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub title: Option<String>,
    /// Primary phone number.
    pub phone1: Option<String>,
    /// Secondary phone number.
    pub phone2: Option<String>,
    /// Tertiary phone number.
    pub phone3: Option<String>,
    /// Primary email address.
    pub email1: Option<String>,
    /// Secondary email address.
    pub email2: Option<String>,
    /// Tertiary email address.
    pub email3: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Free-text biography.
    pub bio: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Business website URL.
    pub website: Option<String>,
    /// Portfolio website URL.
    pub portfolio: Option<String>,
    /// Location-map URL.
    pub map_url: Option<String>,
    /// Social-platform links.
    pub social: Json<SocialLinks>,
    /// Working hours.
    pub working_hours: Json<WorkingHours>,
    /// Uploaded profile photo URL.
    pub photo_url: Option<String>,
    /// Generated PDF URL.
    pub pdf_url: Option<String>,
    /// Generated vCard file URL.
    pub vcard_url: Option<String>,
    /// Generated QR code image URL.
    pub qr_code_url: Option<String>,
    /// Lifecycle status.
    pub status: ClientStatus,
    /// Append-only history trail.
    pub history: Json<Vec<HistoryEntry>>,
    /// When the record was created (immutable).
    pub created_at: DateTime<Utc>,
    /// Refreshed on every persisted mutation.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// All populated phone numbers in slot order.
    pub fn phones(&self) -> Vec<&str> {
        [&self.phone1, &self.phone2, &self.phone3]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// All populated email addresses in slot order.
    pub fn emails(&self) -> Vec<&str> {
        [&self.email1, &self.email2, &self.email3]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Whether the record has at least one phone or email.
    pub fn has_contact_channel(&self) -> bool {
        !self.phones().is_empty() || !self.emails().is_empty()
    }
}

/// Data accepted from the public submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClient {
    /// Display name (required).
    pub name: String,
    /// Job title.
    pub title: Option<String>,
    /// Primary phone number.
    pub phone1: Option<String>,
    /// Secondary phone number.
    pub phone2: Option<String>,
    /// Tertiary phone number.
    pub phone3: Option<String>,
    /// Primary email address.
    pub email1: Option<String>,
    /// Secondary email address.
    pub email2: Option<String>,
    /// Tertiary email address.
    pub email3: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Free-text biography.
    pub bio: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Business website URL.
    pub website: Option<String>,
    /// Portfolio website URL.
    pub portfolio: Option<String>,
    /// Location-map URL.
    pub map_url: Option<String>,
    /// Social-platform links.
    pub social: Option<SocialLinks>,
    /// Working hours.
    pub working_hours: Option<WorkingHours>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_preserves_absent_fields() {
        let mut links = SocialLinks {
            linkedin: Some("https://linkedin.com/in/jane".into()),
            twitter: Some("https://x.com/jane".into()),
            ..Default::default()
        };
        links.merge_from(SocialLinks {
            twitter: Some("https://x.com/jane2".into()),
            ..Default::default()
        });
        assert_eq!(links.linkedin.as_deref(), Some("https://linkedin.com/in/jane"));
        assert_eq!(links.twitter.as_deref(), Some("https://x.com/jane2"));
    }

    #[test]
    fn working_hours_merge_is_field_wise() {
        let mut hours = WorkingHours {
            weekdays: Some("09:00-17:00".into()),
            saturday: Some("10:00-14:00".into()),
            sunday: None,
        };
        hours.merge_from(WorkingHours {
            sunday: Some("closed".into()),
            ..Default::default()
        });
        assert_eq!(hours.weekdays.as_deref(), Some("09:00-17:00"));
        assert_eq!(hours.sunday.as_deref(), Some("closed"));
    }
}
