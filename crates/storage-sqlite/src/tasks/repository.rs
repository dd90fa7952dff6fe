use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;

use tandem_core::events::{StoreNotifier, Table};
use tandem_core::tasks::{OwnerType, Task, TaskRepositoryTrait, TaskStatus};
use tandem_core::Result;

use super::model::TaskDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::tasks;
use crate::utils::date_to_string;

/// Repository for managing task data in the database.
pub struct TaskRepository {
    pool: DbPool,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl TaskRepository {
    pub fn new(pool: DbPool, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }

    fn rows_to_tasks(rows: Vec<TaskDB>) -> Result<Vec<Task>> {
        rows.into_iter().map(Task::try_from).collect()
    }

    fn notify(&self) {
        self.notifier.notify(Table::Tasks);
    }
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    fn get_task(&self, task_id: &str) -> Result<Option<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let row = tasks::table
            .find(task_id)
            .select(TaskDB::as_select())
            .first::<TaskDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Task::try_from).transpose()
    }

    fn get_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::week_id.eq(week_id))
            .filter(tasks::owner_id.eq(user_id).or(tasks::created_by.eq(user_id)))
            .select(TaskDB::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    fn get_tasks_by_owner_type(&self, user_id: &str, owner_type: OwnerType) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::owner_type.eq(owner_type.as_str()))
            .filter(tasks::owner_id.eq(user_id).or(tasks::created_by.eq(user_id)))
            .select(TaskDB::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    fn get_tasks_for_week_and_owner(
        &self,
        user_id: &str,
        week_id: &str,
        owner_type: OwnerType,
    ) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::week_id.eq(week_id))
            .filter(tasks::owner_type.eq(owner_type.as_str()))
            .filter(tasks::owner_id.eq(user_id).or(tasks::created_by.eq(user_id)))
            .select(TaskDB::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    fn get_tasks_for_goal(&self, goal_id: &str) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::linked_goal_id.eq(goal_id))
            .select(TaskDB::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    fn get_tasks_for_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::scheduled_date.eq(date_to_string(date)))
            .filter(tasks::owner_id.eq(user_id).or(tasks::created_by.eq(user_id)))
            .select(TaskDB::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    fn get_overdue_tasks(&self, user_id: &str, today: NaiveDate) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::scheduled_date.lt(date_to_string(today)))
            .filter(tasks::status.ne(TaskStatus::Completed.as_str()))
            .filter(tasks::owner_id.eq(user_id).or(tasks::created_by.eq(user_id)))
            .select(TaskDB::as_select())
            .order(tasks::scheduled_date.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    fn get_unscheduled_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::scheduled_date.is_null())
            .filter(tasks::owner_id.eq(user_id).or(tasks::created_by.eq(user_id)))
            .select(TaskDB::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    fn get_subtasks(&self, parent_task_id: &str) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::parent_task_id.eq(parent_task_id))
            .select(TaskDB::as_select())
            .order(tasks::created_at.asc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::rows_to_tasks(rows)
    }

    async fn insert_task(&self, task: Task) -> Result<Task> {
        let task_db = TaskDB::from(task);
        let inserted = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let row = diesel::insert_into(tasks::table)
                    .values(&task_db)
                    .returning(TaskDB::as_returning())
                    .get_result::<TaskDB>(conn)
                    .map_err(StorageError::from)?;
                Task::try_from(row)
            })
            .await?;
        self.notify();
        Ok(inserted)
    }

    async fn update_task(&self, task: Task) -> Result<Option<Task>> {
        let task_db = TaskDB::from(task);
        let updated = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Task>> {
                let task_id = task_db.id.clone();
                let affected = diesel::update(tasks::table.find(&task_id))
                    .set(&task_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Ok(None);
                }
                let row = tasks::table
                    .find(&task_id)
                    .select(TaskDB::as_select())
                    .first::<TaskDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Some(Task::try_from(row)?))
            })
            .await?;
        if updated.is_some() {
            self.notify();
        }
        Ok(updated)
    }

    async fn upsert_task(&self, task: Task) -> Result<Task> {
        let task_db = TaskDB::from(task);
        let stored = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let row = diesel::insert_into(tasks::table)
                    .values(&task_db)
                    .on_conflict(tasks::id)
                    .do_update()
                    .set(&task_db)
                    .returning(TaskDB::as_returning())
                    .get_result::<TaskDB>(conn)
                    .map_err(StorageError::from)?;
                Task::try_from(row)
            })
            .await?;
        self.notify();
        Ok(stored)
    }

    async fn delete_task(&self, task_id: &str) -> Result<usize> {
        let task_id = task_id.to_string();
        let removed = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(tasks::table.find(task_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await?;
        if removed > 0 {
            self.notify();
        }
        Ok(removed)
    }

    async fn delete_subtasks_of(&self, parent_task_id: &str) -> Result<usize> {
        let parent_task_id = parent_task_id.to_string();
        let removed = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(tasks::table.filter(tasks::parent_task_id.eq(parent_task_id)))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await?;
        if removed > 0 {
            self.notify();
        }
        Ok(removed)
    }

    async fn delete_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let week_id = week_id.to_string();
        let removed = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    tasks::table
                        .filter(tasks::week_id.eq(week_id))
                        .filter(tasks::owner_id.eq(&user_id).or(tasks::created_by.eq(&user_id))),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await?;
        if removed > 0 {
            self.notify();
        }
        Ok(removed)
    }

    async fn clear_goal_links(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        let cleared = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::update(tasks::table.filter(tasks::linked_goal_id.eq(goal_id)))
                        .set(tasks::linked_goal_id.eq(None::<String>))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await?;
        if cleared > 0 {
            self.notify();
        }
        Ok(cleared)
    }
}
