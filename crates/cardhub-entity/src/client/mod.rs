//! Client entity: the business-card profile record.

pub mod history;
pub mod model;
pub mod patch;
pub mod public;
pub mod status;

pub use history::HistoryEntry;
pub use model::{Client, CreateClient, SocialLinks, WorkingHours};
pub use patch::ClientPatch;
pub use public::PublicProfile;
pub use status::ClientStatus;
