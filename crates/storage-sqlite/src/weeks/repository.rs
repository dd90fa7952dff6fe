use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use tandem_core::events::{StoreNotifier, Table};
use tandem_core::weeks::{Week, WeekRepositoryTrait};
use tandem_core::Result;

use super::model::WeekDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::weeks;

/// Repository for managing week data in the database.
pub struct WeekRepository {
    pool: DbPool,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl WeekRepository {
    pub fn new(pool: DbPool, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl WeekRepositoryTrait for WeekRepository {
    fn get_week(&self, week_id: &str, user_id: &str) -> Result<Option<Week>> {
        let mut conn = get_connection(&self.pool)?;
        let row = weeks::table
            .find((week_id, user_id))
            .select(WeekDB::as_select())
            .first::<WeekDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Week::try_from).transpose()
    }

    fn get_weeks_for_user(&self, user_id: &str) -> Result<Vec<Week>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = weeks::table
            .filter(weeks::user_id.eq(user_id))
            .select(WeekDB::as_select())
            .order(weeks::start_date.desc())
            .load::<WeekDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Week::try_from).collect()
    }

    async fn insert_week(&self, week: Week) -> Result<Week> {
        let week_db = WeekDB::from(week);
        let inserted = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Week> {
                let row = diesel::insert_into(weeks::table)
                    .values(&week_db)
                    .returning(WeekDB::as_returning())
                    .get_result::<WeekDB>(conn)
                    .map_err(StorageError::from)?;
                Week::try_from(row)
            })
            .await?;
        self.notifier.notify(Table::Weeks);
        Ok(inserted)
    }

    async fn update_week(&self, week: Week) -> Result<Option<Week>> {
        let week_db = WeekDB::from(week);
        let updated = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Week>> {
                let key = (week_db.id.clone(), week_db.user_id.clone());
                let affected = diesel::update(weeks::table.find(key.clone()))
                    .set(&week_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Ok(None);
                }
                let row = weeks::table
                    .find(key)
                    .select(WeekDB::as_select())
                    .first::<WeekDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Some(Week::try_from(row)?))
            })
            .await?;
        if updated.is_some() {
            self.notifier.notify(Table::Weeks);
        }
        Ok(updated)
    }

    async fn delete_week(&self, week_id: &str, user_id: &str) -> Result<usize> {
        let key = (week_id.to_string(), user_id.to_string());
        let removed = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(weeks::table.find(key))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await?;
        if removed > 0 {
            self.notifier.notify(Table::Weeks);
        }
        Ok(removed)
    }
}
