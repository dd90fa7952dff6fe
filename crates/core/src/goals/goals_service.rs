use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::Stream;
use log::debug;
use uuid::Uuid;

use crate::calendar;
use crate::constants::{GOAL_NAME_MAX_LEN, MAX_ACTIVE_GOALS_PER_OWNER};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{observe, StoreNotifier, Table};
use crate::tasks::TaskRepositoryTrait;

use super::goals_model::{Goal, GoalProgress, GoalStatus, GoalType, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

/// Service for goal CRUD and the weekly-reset / expiration batch jobs.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    task_repository: Arc<dyn TaskRepositoryTrait>,
    notifier: StoreNotifier,
}

impl GoalService {
    pub fn new(
        repository: Arc<dyn GoalRepositoryTrait>,
        task_repository: Arc<dyn TaskRepositoryTrait>,
        notifier: StoreNotifier,
    ) -> Self {
        GoalService {
            repository,
            task_repository,
            notifier,
        }
    }

    fn validate_name(name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "goal name must not be blank".to_string(),
            )));
        }
        if trimmed.chars().count() > GOAL_NAME_MAX_LEN {
            return Err(Error::Validation(ValidationError::OutOfRange(format!(
                "goal name exceeds {GOAL_NAME_MAX_LEN} characters"
            ))));
        }
        Ok(trimmed.to_string())
    }

    async fn save(&self, mut goal: Goal) -> Result<Option<Goal>> {
        goal.updated_at = Utc::now();
        self.repository.update_goal(goal).await
    }

    /// Snapshot the goal's current week into history, unless one already
    /// exists for that goal-week.
    async fn snapshot_progress(&self, goal: &Goal) -> Result<Option<GoalProgress>> {
        if self
            .repository
            .get_progress_for_goal_week(&goal.id, &goal.current_week_id)?
            .is_some()
        {
            debug!(
                "snapshot for goal {} week {} already recorded, skipping",
                goal.id, goal.current_week_id
            );
            return Ok(None);
        }
        let progress = GoalProgress {
            id: Uuid::new_v4().to_string(),
            goal_id: goal.id.clone(),
            week_id: goal.current_week_id.clone(),
            progress_value: goal.current_progress,
            target_value: goal.goal_type.target_value(),
            created_at: Utc::now(),
        };
        Ok(Some(self.repository.insert_progress(progress).await?))
    }

    /// The last week a goal with a duration covers.
    fn end_week_id(goal: &Goal) -> Result<Option<String>> {
        match goal.duration_weeks {
            Some(duration) if duration > 0 => Ok(Some(calendar::add_weeks(
                &goal.start_week_id,
                i64::from(duration) - 1,
            )?)),
            _ => Ok(None),
        }
    }

    /// Live stream of one owner's goals.
    pub fn watch_goals_for_owner(&self, owner_id: &str) -> impl Stream<Item = Result<Vec<Goal>>> {
        let repository = self.repository.clone();
        let owner_id = owner_id.to_string();
        observe(&self.notifier, Table::Goals, move || {
            repository.load_goals_for_owner(&owner_id)
        })
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let name = Self::validate_name(&new_goal.name)?;
        calendar::parse_week_id(&new_goal.start_week_id)?;
        if let Some(duration) = new_goal.duration_weeks {
            if duration < 1 {
                return Err(Error::Validation(ValidationError::OutOfRange(format!(
                    "goal duration must be at least one week, got {duration}"
                ))));
            }
        }

        let active = self
            .repository
            .count_active_goals_for_owner(&new_goal.owner_id)?;
        if active >= MAX_ACTIVE_GOALS_PER_OWNER {
            return Err(Error::Validation(ValidationError::OutOfRange(format!(
                "owner already has {MAX_ACTIVE_GOALS_PER_OWNER} active goals"
            ))));
        }

        let now = Utc::now();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            name,
            icon: new_goal.icon,
            goal_type: new_goal.goal_type,
            duration_weeks: new_goal.duration_weeks,
            start_week_id: new_goal.start_week_id.clone(),
            owner_id: new_goal.owner_id,
            current_progress: 0,
            current_week_id: new_goal.start_week_id,
            status: GoalStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_goal(goal).await
    }

    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>> {
        self.repository.get_goal(goal_id)
    }

    fn get_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        self.repository.load_goals_for_owner(owner_id)
    }

    fn get_active_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        self.repository.load_active_goals_for_owner(owner_id)
    }

    fn get_progress_history(&self, goal_id: &str) -> Result<Vec<GoalProgress>> {
        self.repository.get_progress_for_goal(goal_id)
    }

    async fn update_goal(
        &self,
        goal_id: &str,
        name: String,
        icon: String,
    ) -> Result<Option<Goal>> {
        let name = Self::validate_name(&name)?;
        let Some(mut goal) = self.repository.get_goal(goal_id)? else {
            return Ok(None);
        };
        goal.name = name;
        goal.icon = icon;
        self.save(goal).await
    }

    async fn increment_progress(&self, goal_id: &str, amount: i32) -> Result<Option<Goal>> {
        if amount < 0 {
            return Err(Error::Validation(ValidationError::OutOfRange(format!(
                "progress increment must be non-negative, got {amount}"
            ))));
        }
        let Some(mut goal) = self.repository.get_goal(goal_id)? else {
            return Ok(None);
        };
        goal.current_progress += amount;
        // Only TargetAmount goals complete on their own; weekly types reset
        // every week and are judged at expiration.
        if matches!(goal.goal_type, GoalType::TargetAmount { .. })
            && goal.status == GoalStatus::Active
            && goal.has_met_target()
        {
            goal.status = GoalStatus::Completed;
        }
        self.save(goal).await
    }

    async fn update_status(&self, goal_id: &str, status: GoalStatus) -> Result<Option<Goal>> {
        let Some(mut goal) = self.repository.get_goal(goal_id)? else {
            return Ok(None);
        };
        goal.status = status;
        self.save(goal).await
    }

    async fn record_weekly_progress(&self, goal_id: &str) -> Result<Option<GoalProgress>> {
        let Some(goal) = self.repository.get_goal(goal_id)? else {
            return Ok(None);
        };
        self.snapshot_progress(&goal).await
    }

    async fn reset_weekly_progress(
        &self,
        goal_id: &str,
        new_week_id: &str,
    ) -> Result<Option<Goal>> {
        calendar::parse_week_id(new_week_id)?;
        let Some(mut goal) = self.repository.get_goal(goal_id)? else {
            return Ok(None);
        };
        goal.current_progress = 0;
        goal.current_week_id = new_week_id.to_string();
        self.save(goal).await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<Option<usize>> {
        if self.repository.get_goal(goal_id)?.is_none() {
            return Ok(None);
        }
        // Two sequential writes, no cross-table transaction: a crash in
        // between leaves tasks pointing at a missing goal, which readers
        // tolerate.
        let unlinked = self.task_repository.clear_goal_links(goal_id).await?;
        debug!("cleared goal link on {unlinked} tasks before deleting goal {goal_id}");
        let removed = self.repository.delete_goal(goal_id).await?;
        Ok(Some(removed))
    }

    async fn process_weekly_resets(&self, current_week_id: &str) -> Result<usize> {
        calendar::parse_week_id(current_week_id)?;
        let mut processed = 0;
        for goal in self.repository.load_goals()? {
            if goal.current_week_id == current_week_id {
                continue;
            }
            // Snapshot before reset so history is never lost; the sweep is
            // re-runnable because the week check above stops repeats.
            self.snapshot_progress(&goal).await?;
            let mut goal = goal;
            goal.current_progress = 0;
            goal.current_week_id = current_week_id.to_string();
            self.save(goal).await?;
            processed += 1;
        }
        Ok(processed)
    }

    async fn check_goal_expirations(&self, current_week_id: &str) -> Result<usize> {
        calendar::parse_week_id(current_week_id)?;
        let mut transitioned = 0;
        for goal in self.repository.load_goals()? {
            if goal.status != GoalStatus::Active {
                continue;
            }
            let Some(end_week_id) = Self::end_week_id(&goal)? else {
                continue;
            };
            if calendar::compare_week_ids(current_week_id, &end_week_id)? != Ordering::Greater {
                continue;
            }
            let mut goal = goal;
            goal.status = if goal.has_met_target() {
                GoalStatus::Completed
            } else {
                GoalStatus::Expired
            };
            self.save(goal).await?;
            transitioned += 1;
        }
        Ok(transitioned)
    }
}
