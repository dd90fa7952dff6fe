use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;

use tandem_core::events::{StoreNotifier, Table};
use tandem_core::goals::{Goal, GoalProgress, GoalRepositoryTrait, GoalStatus};
use tandem_core::Result;

use super::model::{GoalDB, GoalProgressDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{goal_progress, goals};

/// Repository for managing goal and goal-progress data in the database.
pub struct GoalRepository {
    pool: DbPool,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl GoalRepository {
    pub fn new(pool: DbPool, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }

    fn rows_to_goals(rows: Vec<GoalDB>) -> Result<Vec<Goal>> {
        rows.into_iter().map(Goal::try_from).collect()
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .find(goal_id)
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Goal::try_from).transpose()
    }

    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .select(GoalDB::as_select())
            .order(goals::created_at.asc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_goals(rows)
    }

    fn load_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::owner_id.eq(owner_id))
            .select(GoalDB::as_select())
            .order(goals::created_at.asc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_goals(rows)
    }

    fn load_active_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::owner_id.eq(owner_id))
            .filter(goals::status.eq(GoalStatus::Active.as_str()))
            .select(GoalDB::as_select())
            .order(goals::created_at.asc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_goals(rows)
    }

    fn count_active_goals_for_owner(&self, owner_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .filter(goals::owner_id.eq(owner_id))
            .filter(goals::status.eq(GoalStatus::Active.as_str()))
            .select(count_star())
            .first::<i64>(&mut conn)
            .map_err(|e| StorageError::from(e).into())
    }

    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        let goal_db = GoalDB::from(goal);
        let inserted = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Goal::try_from(row)
            })
            .await?;
        self.notifier.notify(Table::Goals);
        Ok(inserted)
    }

    async fn update_goal(&self, goal: Goal) -> Result<Option<Goal>> {
        let goal_db = GoalDB::from(goal);
        let updated = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Goal>> {
                let goal_id = goal_db.id.clone();
                let affected = diesel::update(goals::table.find(&goal_id))
                    .set(&goal_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Ok(None);
                }
                let row = goals::table
                    .find(&goal_id)
                    .select(GoalDB::as_select())
                    .first::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Some(Goal::try_from(row)?))
            })
            .await?;
        if updated.is_some() {
            self.notifier.notify(Table::Goals);
        }
        Ok(updated)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        let removed = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(goals::table.find(goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await?;
        if removed > 0 {
            self.notifier.notify(Table::Goals);
        }
        Ok(removed)
    }

    fn get_progress_for_goal(&self, goal_id: &str) -> Result<Vec<GoalProgress>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goal_progress::table
            .filter(goal_progress::goal_id.eq(goal_id))
            .select(GoalProgressDB::as_select())
            .order(goal_progress::created_at.asc())
            .load::<GoalProgressDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(GoalProgress::try_from).collect()
    }

    fn get_progress_for_goal_week(
        &self,
        goal_id: &str,
        week_id: &str,
    ) -> Result<Option<GoalProgress>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goal_progress::table
            .filter(goal_progress::goal_id.eq(goal_id))
            .filter(goal_progress::week_id.eq(week_id))
            .select(GoalProgressDB::as_select())
            .first::<GoalProgressDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(GoalProgress::try_from).transpose()
    }

    async fn insert_progress(&self, progress: GoalProgress) -> Result<GoalProgress> {
        let progress_db = GoalProgressDB::from(progress);
        let inserted = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GoalProgress> {
                let row = diesel::insert_into(goal_progress::table)
                    .values(&progress_db)
                    .returning(GoalProgressDB::as_returning())
                    .get_result::<GoalProgressDB>(conn)
                    .map_err(StorageError::from)?;
                GoalProgress::try_from(row)
            })
            .await?;
        self.notifier.notify(Table::GoalProgress);
        Ok(inserted)
    }
}
