//! Partnership, invite, and mirrored partner-goal domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::goals::{GoalStatus, GoalType};

/// Status of a partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnershipStatus {
    #[default]
    Active,
    Dissolved,
}

impl PartnershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnershipStatus::Active => "ACTIVE",
            PartnershipStatus::Dissolved => "DISSOLVED",
        }
    }
}

impl std::str::FromStr for PartnershipStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(PartnershipStatus::Active),
            "DISSOLVED" => Ok(PartnershipStatus::Dissolved),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown partnership status '{other}'"
            )))),
        }
    }
}

/// Symmetric pairing of exactly two users.
///
/// `user1_id < user2_id` always holds; the constructor canonicalizes the
/// ordering so the same pair never produces two distinct rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    pub id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub created_at: DateTime<Utc>,
    pub status: PartnershipStatus,
}

impl Partnership {
    pub fn new(id: String, user_a: String, user_b: String, created_at: DateTime<Utc>) -> Self {
        let (user1_id, user2_id) = if user_a <= user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };
        Partnership {
            id,
            user1_id,
            user2_id,
            created_at,
            status: PartnershipStatus::Active,
        }
    }

    /// The counter-party of `user_id`, or `None` when the user is not part
    /// of this partnership.
    pub fn partner_of(&self, user_id: &str) -> Option<&str> {
        if self.user1_id == user_id {
            Some(&self.user2_id)
        } else if self.user2_id == user_id {
            Some(&self.user1_id)
        } else {
            None
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }
}

/// Status of an invite code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Expired,
    Cancelled,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "PENDING",
            InviteStatus::Accepted => "ACCEPTED",
            InviteStatus::Expired => "EXPIRED",
            InviteStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for InviteStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(InviteStatus::Pending),
            "ACCEPTED" => Ok(InviteStatus::Accepted),
            "EXPIRED" => Ok(InviteStatus::Expired),
            "CANCELLED" => Ok(InviteStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown invite status '{other}'"
            )))),
        }
    }
}

/// Ephemeral pairing code. The remote authority owns issuance and
/// validation; the local row is a passive mirror for offline display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub code: String,
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub accepted_by: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub status: InviteStatus,
}

/// Read-only mirrored copy of a counter-party's goal.
///
/// Refreshed by synchronization; never owner-mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartnerGoal {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub icon: String,
    #[serde(flatten)]
    pub goal_type: GoalType,
    pub current_progress: i32,
    pub current_week_id: String,
    pub status: GoalStatus,
    pub updated_at: DateTime<Utc>,
    pub synced_at: DateTime<Utc>,
}

// --- Remote authority records (flat, as returned by the RPC surface) ---

/// Invite record as issued by the remote authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteInvite {
    pub code: String,
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: InviteStatus,
}

/// Partnership record as returned by the remote authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePartnership {
    pub id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub created_at: DateTime<Utc>,
    pub status: PartnershipStatus,
}

impl From<RemotePartnership> for Partnership {
    fn from(remote: RemotePartnership) -> Self {
        let mut partnership = Partnership::new(
            remote.id,
            remote.user1_id,
            remote.user2_id,
            remote.created_at,
        );
        partnership.status = remote.status;
        partnership
    }
}
