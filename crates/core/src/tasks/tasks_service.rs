use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use futures::Stream;
use uuid::Uuid;

use crate::calendar;
use crate::errors::{Error, Result, ValidationError};
use crate::events::{observe, StoreNotifier, Table};

use super::tasks_model::{NewTask, OwnerType, Task, TaskStatus, TaskUpdate};
use super::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};

/// Service for task CRUD and filtered reactive queries.
///
/// All writes go through here: input is validated, ids and timestamps are
/// assigned, and the store's notifier re-emits to every open query stream.
pub struct TaskService {
    repository: Arc<dyn TaskRepositoryTrait>,
    notifier: StoreNotifier,
    timezone: Tz,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepositoryTrait>,
        notifier: StoreNotifier,
        timezone: Tz,
    ) -> Self {
        TaskService {
            repository,
            notifier,
            timezone,
        }
    }

    fn validate_title(title: &str) -> Result<String> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "task title must not be empty".to_string(),
            )));
        }
        Ok(trimmed.to_string())
    }

    fn validate_repeat_target(repeat_target: Option<i32>) -> Result<()> {
        if let Some(target) = repeat_target {
            if target < 0 {
                return Err(Error::Validation(ValidationError::OutOfRange(format!(
                    "repeat target must be non-negative, got {target}"
                ))));
            }
        }
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Loads, mutates, stamps `updated_at`, and persists a task.
    async fn mutate<F>(&self, task_id: &str, apply: F) -> Result<Option<Task>>
    where
        F: FnOnce(&mut Task) -> Result<()>,
    {
        let Some(mut task) = self.repository.get_task(task_id)? else {
            return Ok(None);
        };
        apply(&mut task)?;
        task.updated_at = Utc::now();
        self.repository.update_task(task).await
    }

    /// Live stream of a user's tasks for one week. Emits the current
    /// snapshot immediately, then again after every task-table write.
    pub fn watch_tasks_for_week(
        &self,
        user_id: &str,
        week_id: &str,
    ) -> impl Stream<Item = Result<Vec<Task>>> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        let week_id = week_id.to_string();
        observe(&self.notifier, Table::Tasks, move || {
            repository.get_tasks_for_week(&user_id, &week_id)
        })
    }

    /// Live stream of a user's tasks for one week and owner type.
    pub fn watch_tasks_for_week_and_owner(
        &self,
        user_id: &str,
        week_id: &str,
        owner_type: OwnerType,
    ) -> impl Stream<Item = Result<Vec<Task>>> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        let week_id = week_id.to_string();
        observe(&self.notifier, Table::Tasks, move || {
            repository.get_tasks_for_week_and_owner(&user_id, &week_id, owner_type)
        })
    }
}

#[async_trait]
impl TaskServiceTrait for TaskService {
    async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        let title = Self::validate_title(&new_task.title)?;
        calendar::parse_week_id(&new_task.week_id)?;
        Self::validate_repeat_target(new_task.repeat_target)?;
        if let Some(rolled_from) = &new_task.rolled_from_week_id {
            calendar::parse_week_id(rolled_from)?;
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title,
            notes: new_task.notes,
            owner_id: new_task.owner_id,
            owner_type: new_task.owner_type,
            week_id: new_task.week_id,
            status: new_task.status.unwrap_or_default(),
            created_by: new_task.created_by,
            parent_task_id: new_task.parent_task_id,
            repeat_target: new_task.repeat_target,
            repeat_completed: 0,
            linked_goal_id: new_task.linked_goal_id,
            review_note: None,
            rolled_from_week_id: new_task.rolled_from_week_id,
            scheduled_date: new_task.scheduled_date,
            deadline: new_task.deadline,
            priority: new_task.priority,
            labels: new_task.labels,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_task(task).await
    }

    fn get_task(&self, task_id: &str) -> Result<Option<Task>> {
        self.repository.get_task(task_id)
    }

    fn get_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<Vec<Task>> {
        self.repository.get_tasks_for_week(user_id, week_id)
    }

    fn get_tasks_by_owner_type(&self, user_id: &str, owner_type: OwnerType) -> Result<Vec<Task>> {
        self.repository.get_tasks_by_owner_type(user_id, owner_type)
    }

    fn get_tasks_for_week_and_owner(
        &self,
        user_id: &str,
        week_id: &str,
        owner_type: OwnerType,
    ) -> Result<Vec<Task>> {
        self.repository
            .get_tasks_for_week_and_owner(user_id, week_id, owner_type)
    }

    fn get_tasks_for_goal(&self, goal_id: &str) -> Result<Vec<Task>> {
        self.repository.get_tasks_for_goal(goal_id)
    }

    fn get_tasks_for_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Task>> {
        self.repository.get_tasks_for_date(user_id, date)
    }

    fn get_overdue_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        self.repository.get_overdue_tasks(user_id, self.today())
    }

    fn get_unscheduled_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        self.repository.get_unscheduled_tasks(user_id)
    }

    async fn update_task(&self, task_id: &str, update: TaskUpdate) -> Result<Option<Task>> {
        let title = Self::validate_title(&update.title)?;
        self.mutate(task_id, move |task| {
            task.title = title;
            task.notes = update.notes;
            task.status = update.status;
            Ok(())
        })
        .await
    }

    async fn update_status(&self, task_id: &str, status: TaskStatus) -> Result<Option<Task>> {
        self.mutate(task_id, move |task| {
            task.status = status;
            Ok(())
        })
        .await
    }

    async fn increment_repeat_count(&self, task_id: &str) -> Result<Option<Task>> {
        self.mutate(task_id, |task| {
            task.repeat_completed += 1;
            Ok(())
        })
        .await
    }

    async fn update_review_note(
        &self,
        task_id: &str,
        review_note: Option<String>,
    ) -> Result<Option<Task>> {
        self.mutate(task_id, move |task| {
            task.review_note = review_note;
            Ok(())
        })
        .await
    }

    async fn update_owner(
        &self,
        task_id: &str,
        owner_id: &str,
        owner_type: OwnerType,
    ) -> Result<Option<Task>> {
        let owner_id = owner_id.to_string();
        self.mutate(task_id, move |task| {
            task.owner_id = owner_id;
            task.owner_type = owner_type;
            Ok(())
        })
        .await
    }

    async fn update_schedule(
        &self,
        task_id: &str,
        scheduled_date: Option<NaiveDate>,
    ) -> Result<Option<Task>> {
        self.mutate(task_id, move |task| {
            task.scheduled_date = scheduled_date;
            Ok(())
        })
        .await
    }

    async fn update_deadline(
        &self,
        task_id: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<Option<Task>> {
        self.mutate(task_id, move |task| {
            task.deadline = deadline;
            Ok(())
        })
        .await
    }

    async fn update_priority(&self, task_id: &str, priority: Option<i32>) -> Result<Option<Task>> {
        self.mutate(task_id, move |task| {
            task.priority = priority;
            Ok(())
        })
        .await
    }

    async fn update_labels(&self, task_id: &str, labels: Vec<String>) -> Result<Option<Task>> {
        self.mutate(task_id, move |task| {
            task.labels = labels;
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, task_id: &str) -> Result<Option<usize>> {
        if self.repository.get_task(task_id)?.is_none() {
            return Ok(None);
        }
        let subtasks = self.repository.delete_subtasks_of(task_id).await?;
        let own = self.repository.delete_task(task_id).await?;
        Ok(Some(subtasks + own))
    }

    async fn delete_tasks_for_week(&self, user_id: &str, week_id: &str) -> Result<usize> {
        calendar::parse_week_id(week_id)?;
        self.repository.delete_tasks_for_week(user_id, week_id).await
    }
}
