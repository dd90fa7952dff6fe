use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use tandem_core::events::{StoreNotifier, Table};
use tandem_core::partnerships::{
    Invite, PartnerGoal, Partnership, PartnershipRepositoryTrait, PartnershipStatus,
};
use tandem_core::Result;

use super::model::{InviteDB, PartnerGoalDB, PartnershipDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{invites, partner_goals, partnerships};

/// Repository for partnership, invite, and partner-goal data.
pub struct PartnershipRepository {
    pool: DbPool,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl PartnershipRepository {
    pub fn new(pool: DbPool, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl PartnershipRepositoryTrait for PartnershipRepository {
    fn get_partnership_for_user(&self, user_id: &str) -> Result<Option<Partnership>> {
        let mut conn = get_connection(&self.pool)?;
        let row = partnerships::table
            .filter(
                partnerships::user1_id
                    .eq(user_id)
                    .or(partnerships::user2_id.eq(user_id)),
            )
            .order(partnerships::created_at.desc())
            .select(PartnershipDB::as_select())
            .first::<PartnershipDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Partnership::try_from).transpose()
    }

    async fn upsert_partnership(&self, partnership: Partnership) -> Result<Partnership> {
        let partnership_db = PartnershipDB::from(partnership);
        let stored = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Partnership> {
                let row = diesel::insert_into(partnerships::table)
                    .values(&partnership_db)
                    .on_conflict(partnerships::id)
                    .do_update()
                    .set(&partnership_db)
                    .returning(PartnershipDB::as_returning())
                    .get_result::<PartnershipDB>(conn)
                    .map_err(StorageError::from)?;
                Partnership::try_from(row)
            })
            .await?;
        self.notifier.notify(Table::Partnerships);
        Ok(stored)
    }

    async fn set_partnership_status(
        &self,
        partnership_id: &str,
        status: PartnershipStatus,
    ) -> Result<Option<Partnership>> {
        let partnership_id = partnership_id.to_string();
        let updated = self
            .writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Option<Partnership>> {
                    let affected =
                        diesel::update(partnerships::table.find(&partnership_id))
                            .set(partnerships::status.eq(status.as_str()))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    if affected == 0 {
                        return Ok(None);
                    }
                    let row = partnerships::table
                        .find(&partnership_id)
                        .select(PartnershipDB::as_select())
                        .first::<PartnershipDB>(conn)
                        .map_err(StorageError::from)?;
                    Ok(Some(Partnership::try_from(row)?))
                },
            )
            .await?;
        if updated.is_some() {
            self.notifier.notify(Table::Partnerships);
        }
        Ok(updated)
    }

    fn get_invite_by_code(&self, code: &str) -> Result<Option<Invite>> {
        let mut conn = get_connection(&self.pool)?;
        let row = invites::table
            .find(code)
            .select(InviteDB::as_select())
            .first::<InviteDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Invite::try_from).transpose()
    }

    async fn upsert_invite(&self, invite: Invite) -> Result<Invite> {
        let invite_db = InviteDB::from(invite);
        let stored = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Invite> {
                let row = diesel::insert_into(invites::table)
                    .values(&invite_db)
                    .on_conflict(invites::code)
                    .do_update()
                    .set(&invite_db)
                    .returning(InviteDB::as_returning())
                    .get_result::<InviteDB>(conn)
                    .map_err(StorageError::from)?;
                Invite::try_from(row)
            })
            .await?;
        self.notifier.notify(Table::Invites);
        Ok(stored)
    }

    fn load_partner_goals_for_owner(&self, owner_id: &str) -> Result<Vec<PartnerGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = partner_goals::table
            .filter(partner_goals::owner_id.eq(owner_id))
            .select(PartnerGoalDB::as_select())
            .order(partner_goals::name.asc())
            .load::<PartnerGoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(PartnerGoal::try_from).collect()
    }

    async fn upsert_partner_goals(&self, goals: Vec<PartnerGoal>) -> Result<usize> {
        if goals.is_empty() {
            return Ok(0);
        }
        let goal_dbs: Vec<PartnerGoalDB> = goals.into_iter().map(PartnerGoalDB::from).collect();
        let affected = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for goal_db in &goal_dbs {
                    affected += diesel::insert_into(partner_goals::table)
                        .values(goal_db)
                        .on_conflict(partner_goals::id)
                        .do_update()
                        .set(goal_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected)
            })
            .await?;
        self.notifier.notify(Table::PartnerGoals);
        Ok(affected)
    }

    async fn delete_partner_goals_for_owner(&self, owner_id: &str) -> Result<usize> {
        let owner_id = owner_id.to_string();
        let removed = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    partner_goals::table.filter(partner_goals::owner_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await?;
        if removed > 0 {
            self.notifier.notify(Table::PartnerGoals);
        }
        Ok(removed)
    }
}
