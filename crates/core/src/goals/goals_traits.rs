use async_trait::async_trait;

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalProgress, GoalStatus, NewGoal};

/// Trait for goal repository operations.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>>;
    fn load_goals(&self) -> Result<Vec<Goal>>;
    fn load_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>>;
    fn load_active_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>>;
    fn count_active_goals_for_owner(&self, owner_id: &str) -> Result<i64>;
    async fn insert_goal(&self, goal: Goal) -> Result<Goal>;
    /// Returns `Ok(None)` when no row with the goal's id exists.
    async fn update_goal(&self, goal: Goal) -> Result<Option<Goal>>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;

    fn get_progress_for_goal(&self, goal_id: &str) -> Result<Vec<GoalProgress>>;
    /// The snapshot for one goal-week, if already recorded. Used as the
    /// idempotency probe by weekly-reset processing.
    fn get_progress_for_goal_week(
        &self,
        goal_id: &str,
        week_id: &str,
    ) -> Result<Option<GoalProgress>>;
    async fn insert_progress(&self, progress: GoalProgress) -> Result<GoalProgress>;
}

/// Trait for goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>>;
    fn get_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>>;
    fn get_active_goals_for_owner(&self, owner_id: &str) -> Result<Vec<Goal>>;
    fn get_progress_history(&self, goal_id: &str) -> Result<Vec<GoalProgress>>;

    async fn update_goal(&self, goal_id: &str, name: String, icon: String)
        -> Result<Option<Goal>>;
    /// Adds `amount` (non-negative) to current progress. TargetAmount goals
    /// auto-transition to COMPLETED once the total is met.
    async fn increment_progress(&self, goal_id: &str, amount: i32) -> Result<Option<Goal>>;
    async fn update_status(&self, goal_id: &str, status: GoalStatus) -> Result<Option<Goal>>;

    /// Appends a GoalProgress snapshot for the goal's current week.
    async fn record_weekly_progress(&self, goal_id: &str) -> Result<Option<GoalProgress>>;
    /// Zeros progress and advances `current_week_id`.
    async fn reset_weekly_progress(&self, goal_id: &str, new_week_id: &str)
        -> Result<Option<Goal>>;

    /// Clears `linked_goal_id` on referencing tasks, then removes the goal.
    /// Tasks are never deleted. Returns `Ok(None)` when the id is unknown.
    async fn delete_goal(&self, goal_id: &str) -> Result<Option<usize>>;

    /// Snapshot-then-reset sweep for every goal not yet on `current_week_id`.
    /// Idempotent and crash-recoverable; returns the number of goals
    /// processed.
    async fn process_weekly_resets(&self, current_week_id: &str) -> Result<usize>;
    /// Transitions ACTIVE goals past their end week to COMPLETED or EXPIRED.
    /// Returns the number of goals transitioned.
    async fn check_goal_expirations(&self, current_week_id: &str) -> Result<usize>;
}
