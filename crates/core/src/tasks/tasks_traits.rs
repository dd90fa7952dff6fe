use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::tasks::tasks_model::{NewTask, OwnerType, Task, TaskStatus, TaskUpdate};

/// Trait for task repository operations.
///
/// Point lookups return `Ok(None)` when the id is unknown so callers can
/// branch without exception-driven control flow. List reads are scoped to
/// tasks the user owns or created; the underlying store has no row-level
/// security, so this filter is the only visibility boundary.
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    fn get_task(&self, task_id: &str) -> Result<Option<Task>>;
    fn get_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<Vec<Task>>;
    fn get_tasks_by_owner_type(&self, user_id: &str, owner_type: OwnerType) -> Result<Vec<Task>>;
    fn get_tasks_for_week_and_owner(
        &self,
        user_id: &str,
        week_id: &str,
        owner_type: OwnerType,
    ) -> Result<Vec<Task>>;
    fn get_tasks_for_goal(&self, goal_id: &str) -> Result<Vec<Task>>;
    fn get_tasks_for_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Task>>;
    /// Tasks scheduled strictly before `today` that are not COMPLETED.
    fn get_overdue_tasks(&self, user_id: &str, today: NaiveDate) -> Result<Vec<Task>>;
    fn get_unscheduled_tasks(&self, user_id: &str) -> Result<Vec<Task>>;
    fn get_subtasks(&self, parent_task_id: &str) -> Result<Vec<Task>>;

    async fn insert_task(&self, task: Task) -> Result<Task>;
    /// Returns `Ok(None)` when no row with the task's id exists.
    async fn update_task(&self, task: Task) -> Result<Option<Task>>;
    /// Insert-or-overwrite by primary key. Last write wins, no field merge.
    async fn upsert_task(&self, task: Task) -> Result<Task>;
    /// Returns the number of rows removed (0 when the id is unknown).
    async fn delete_task(&self, task_id: &str) -> Result<usize>;
    async fn delete_subtasks_of(&self, parent_task_id: &str) -> Result<usize>;
    async fn delete_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<usize>;
    /// Clears `linked_goal_id` on every task referencing the goal.
    async fn clear_goal_links(&self, goal_id: &str) -> Result<usize>;
}

/// Trait for task service operations.
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    async fn create_task(&self, new_task: NewTask) -> Result<Task>;

    fn get_task(&self, task_id: &str) -> Result<Option<Task>>;
    fn get_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<Vec<Task>>;
    fn get_tasks_by_owner_type(&self, user_id: &str, owner_type: OwnerType) -> Result<Vec<Task>>;
    fn get_tasks_for_week_and_owner(
        &self,
        user_id: &str,
        week_id: &str,
        owner_type: OwnerType,
    ) -> Result<Vec<Task>>;
    fn get_tasks_for_goal(&self, goal_id: &str) -> Result<Vec<Task>>;
    fn get_tasks_for_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Task>>;
    fn get_overdue_tasks(&self, user_id: &str) -> Result<Vec<Task>>;
    fn get_unscheduled_tasks(&self, user_id: &str) -> Result<Vec<Task>>;

    async fn update_task(&self, task_id: &str, update: TaskUpdate) -> Result<Option<Task>>;
    async fn update_status(&self, task_id: &str, status: TaskStatus) -> Result<Option<Task>>;
    /// Adds 1 to `repeat_completed`; there is no ceiling.
    async fn increment_repeat_count(&self, task_id: &str) -> Result<Option<Task>>;
    async fn update_review_note(
        &self,
        task_id: &str,
        review_note: Option<String>,
    ) -> Result<Option<Task>>;
    async fn update_owner(
        &self,
        task_id: &str,
        owner_id: &str,
        owner_type: OwnerType,
    ) -> Result<Option<Task>>;
    async fn update_schedule(
        &self,
        task_id: &str,
        scheduled_date: Option<NaiveDate>,
    ) -> Result<Option<Task>>;
    async fn update_deadline(
        &self,
        task_id: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<Option<Task>>;
    async fn update_priority(&self, task_id: &str, priority: Option<i32>) -> Result<Option<Task>>;
    async fn update_labels(&self, task_id: &str, labels: Vec<String>) -> Result<Option<Task>>;

    /// Deletes the task and its subtasks; returns rows removed, or
    /// `Ok(None)` when the id is unknown.
    async fn delete_task(&self, task_id: &str) -> Result<Option<usize>>;
    async fn delete_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<usize>;
}
