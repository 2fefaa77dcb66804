//! Client lifecycle status enumeration and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a client record.
///
/// The forward path is `pending → processed → active`; `rejected`,
/// `disabled`, and `deleted` are side states. `deleted` is terminal —
/// records are never removed, only flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "client_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Submitted via the public form, awaiting admin processing.
    Pending,
    /// Admin has reviewed and updated the record.
    Processed,
    /// vCard artifacts generated; the profile is live.
    Active,
    /// Declined by an admin.
    Rejected,
    /// Temporarily hidden from public view.
    Disabled,
    /// Soft-deleted; record retained, terminal.
    Deleted,
}

impl ClientStatus {
    /// Whether a transition from `self` to `target` is legal.
    ///
    /// The source system never validated transitions, only that the
    /// target was a known status; the explicit table below is a
    /// deliberate hardening of that behavior. Self-transitions are
    /// always rejected.
    pub fn can_transition_to(self, target: ClientStatus) -> bool {
        use ClientStatus::*;
        if self == target {
            return false;
        }
        match self {
            Pending => true,
            Processed => matches!(target, Active | Rejected | Disabled | Deleted),
            Active => matches!(target, Disabled | Deleted),
            Rejected => matches!(target, Pending | Disabled | Deleted),
            Disabled => matches!(target, Active | Deleted),
            Deleted => false,
        }
    }

    /// Whether the profile is visible on public endpoints.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Pending | Self::Processed | Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Active => "active",
            Self::Rejected => "rejected",
            Self::Disabled => "disabled",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = cardhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processed" => Ok(Self::Processed),
            "active" => Ok(Self::Active),
            "rejected" => Ok(Self::Rejected),
            "disabled" => Ok(Self::Disabled),
            "deleted" => Ok(Self::Deleted),
            _ => Err(cardhub_core::AppError::validation(format!(
                "Invalid client status: '{s}'. Expected one of: pending, processed, active, rejected, disabled, deleted"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_is_terminal() {
        for target in [
            ClientStatus::Pending,
            ClientStatus::Processed,
            ClientStatus::Active,
            ClientStatus::Rejected,
            ClientStatus::Disabled,
        ] {
            assert!(!ClientStatus::Deleted.can_transition_to(target));
        }
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(!ClientStatus::Active.can_transition_to(ClientStatus::Active));
    }

    #[test]
    fn forward_path_is_legal() {
        assert!(ClientStatus::Pending.can_transition_to(ClientStatus::Processed));
        assert!(ClientStatus::Processed.can_transition_to(ClientStatus::Active));
        assert!(ClientStatus::Active.can_transition_to(ClientStatus::Disabled));
        assert!(ClientStatus::Disabled.can_transition_to(ClientStatus::Active));
    }

    #[test]
    fn active_cannot_regress_to_pending() {
        assert!(!ClientStatus::Active.can_transition_to(ClientStatus::Pending));
    }

    #[test]
    fn public_visibility_excludes_disabled_and_deleted() {
        assert!(ClientStatus::Active.is_public());
        assert!(!ClientStatus::Disabled.is_public());
        assert!(!ClientStatus::Deleted.is_public());
        assert!(!ClientStatus::Rejected.is_public());
    }

    #[test]
    fn parse_round_trips() {
        for s in ["pending", "processed", "active", "rejected", "disabled", "deleted"] {
            let status: ClientStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
        assert!("approved".parse::<ClientStatus>().is_err());
    }
}
