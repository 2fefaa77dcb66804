//! Typed patch structure for client updates.

use serde::{Deserialize, Serialize};

use super::model::{Client, SocialLinks, WorkingHours};

/// The whitelisted set of mutable client fields.
///
/// Unknown JSON keys are rejected at the deserialization boundary via
/// `deny_unknown_fields` rather than filtered at runtime. Absent fields
/// leave the stored value untouched; sub-objects merge key-by-key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientPatch {
    /// New display name.
    pub name: Option<String>,
    /// New job title.
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
    /// Social links (merged field-by-field).
    pub social: Option<SocialLinks>,
    /// Working hours (merged field-by-field).
    pub working_hours: Option<WorkingHours>,
}

impl ClientPatch {
    /// Apply this patch to a client in place.
    ///
    /// Slug, status, history, artifact URLs, and timestamps are not
    /// touchable through a patch.
    pub fn apply_to(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if self.title.is_some() {
            client.title = self.title;
        }
        if self.phone1.is_some() {
            client.phone1 = self.phone1;
        }
        if self.phone2.is_some() {
            client.phone2 = self.phone2;
        }
        if self.phone3.is_some() {
            client.phone3 = self.phone3;
        }
        if self.email1.is_some() {
            client.email1 = self.email1;
        }
        if self.email2.is_some() {
            client.email2 = self.email2;
        }
        if self.email3.is_some() {
            client.email3 = self.email3;
        }
        if self.company.is_some() {
            client.company = self.company;
        }
        if self.bio.is_some() {
            client.bio = self.bio;
        }
        if self.address.is_some() {
            client.address = self.address;
        }
        if self.website.is_some() {
            client.website = self.website;
        }
        if self.portfolio.is_some() {
            client.portfolio = self.portfolio;
        }
        if self.map_url.is_some() {
            client.map_url = self.map_url;
        }
        if let Some(social) = self.social {
            client.social.0.merge_from(social);
        }
        if let Some(hours) = self.working_hours {
            client.working_hours.0.merge_from(hours);
        }
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.title.is_none()
            && self.phone1.is_none()
            && self.phone2.is_none()
            && self.phone3.is_none()
            && self.email1.is_none()
            && self.email2.is_none()
            && self.email3.is_none()
            && self.company.is_none()
            && self.bio.is_none()
            && self.address.is_none()
            && self.website.is_none()
            && self.portfolio.is_none()
            && self.map_url.is_none()
            && self.social.is_none()
            && self.working_hours.is_none()
    }
}
