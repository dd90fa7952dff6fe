//! Database models for partnerships, invites, and partner goals.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tandem_core::goals::GoalType;
use tandem_core::partnerships::{Invite, PartnerGoal, Partnership};
use tandem_core::{Error, Result};

use crate::utils::{datetime_to_millis, millis_to_datetime};

/// Database model for partnerships.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::partnerships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PartnershipDB {
    pub id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub created_at: i64,
    pub status: String,
}

impl From<Partnership> for PartnershipDB {
    fn from(partnership: Partnership) -> Self {
        Self {
            id: partnership.id,
            user1_id: partnership.user1_id,
            user2_id: partnership.user2_id,
            created_at: datetime_to_millis(partnership.created_at),
            status: partnership.status.as_str().to_string(),
        }
    }
}

impl TryFrom<PartnershipDB> for Partnership {
    type Error = Error;

    fn try_from(db: PartnershipDB) -> Result<Self> {
        Ok(Partnership {
            status: db.status.parse()?,
            created_at: millis_to_datetime(db.created_at)?,
            id: db.id,
            user1_id: db.user1_id,
            user2_id: db.user2_id,
        })
    }
}

/// Database model for invites.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::invites)]
#[diesel(primary_key(code))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct InviteDB {
    pub code: String,
    pub creator_id: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub accepted_by: Option<String>,
    pub accepted_at: Option<i64>,
    pub status: String,
}

impl From<Invite> for InviteDB {
    fn from(invite: Invite) -> Self {
        Self {
            code: invite.code,
            creator_id: invite.creator_id,
            created_at: datetime_to_millis(invite.created_at),
            expires_at: datetime_to_millis(invite.expires_at),
            accepted_by: invite.accepted_by,
            accepted_at: invite.accepted_at.map(datetime_to_millis),
            status: invite.status.as_str().to_string(),
        }
    }
}

impl TryFrom<InviteDB> for Invite {
    type Error = Error;

    fn try_from(db: InviteDB) -> Result<Self> {
        Ok(Invite {
            status: db.status.parse()?,
            created_at: millis_to_datetime(db.created_at)?,
            expires_at: millis_to_datetime(db.expires_at)?,
            accepted_at: db.accepted_at.map(millis_to_datetime).transpose()?,
            code: db.code,
            creator_id: db.creator_id,
            accepted_by: db.accepted_by,
        })
    }
}

/// Database model for mirrored partner goals.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::partner_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PartnerGoalDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub icon: String,
    pub goal_type: String,
    pub target_value: Option<i32>,
    pub current_progress: i32,
    pub current_week_id: String,
    pub status: String,
    pub updated_at: i64,
    pub synced_at: i64,
}

impl From<PartnerGoal> for PartnerGoalDB {
    fn from(goal: PartnerGoal) -> Self {
        Self {
            id: goal.id,
            owner_id: goal.owner_id,
            name: goal.name,
            icon: goal.icon,
            goal_type: goal.goal_type.kind_str().to_string(),
            target_value: goal.goal_type.target_column(),
            current_progress: goal.current_progress,
            current_week_id: goal.current_week_id,
            status: goal.status.as_str().to_string(),
            updated_at: datetime_to_millis(goal.updated_at),
            synced_at: datetime_to_millis(goal.synced_at),
        }
    }
}

impl TryFrom<PartnerGoalDB> for PartnerGoal {
    type Error = Error;

    fn try_from(db: PartnerGoalDB) -> Result<Self> {
        Ok(PartnerGoal {
            goal_type: GoalType::from_parts(&db.goal_type, db.target_value)?,
            status: db.status.parse()?,
            updated_at: millis_to_datetime(db.updated_at)?,
            synced_at: millis_to_datetime(db.synced_at)?,
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            icon: db.icon,
            current_progress: db.current_progress,
            current_week_id: db.current_week_id,
        })
    }
}
