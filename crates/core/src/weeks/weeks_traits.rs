use async_trait::async_trait;

use crate::errors::Result;
use crate::weeks::weeks_model::Week;

/// Trait for week repository operations.
#[async_trait]
pub trait WeekRepositoryTrait: Send + Sync {
    fn get_week(&self, week_id: &str, user_id: &str) -> Result<Option<Week>>;
    fn get_weeks_for_user(&self, user_id: &str) -> Result<Vec<Week>>;
    async fn insert_week(&self, week: Week) -> Result<Week>;
    /// Returns `Ok(None)` when no row with the week's key exists.
    async fn update_week(&self, week: Week) -> Result<Option<Week>>;
    async fn delete_week(&self, week_id: &str, user_id: &str) -> Result<usize>;
}

/// Trait for week service operations.
#[async_trait]
pub trait WeekServiceTrait: Send + Sync {
    /// The current week id in the service's timezone. Pure, no I/O.
    fn current_week_id(&self) -> String;
    /// Looks up the current week for the user, creating it on first access.
    async fn get_or_create_current_week(&self, user_id: &str) -> Result<Week>;
    fn get_week(&self, week_id: &str, user_id: &str) -> Result<Option<Week>>;
    fn get_weeks_for_user(&self, user_id: &str) -> Result<Vec<Week>>;
    /// Persists a week after checking the Monday-start and six-day-span
    /// invariants and the rating range.
    async fn save_week(&self, week: Week) -> Result<Week>;
    async fn update_week_review(
        &self,
        week_id: &str,
        user_id: &str,
        rating: i32,
        review_note: Option<String>,
    ) -> Result<Option<Week>>;
    async fn mark_planning_completed(&self, week_id: &str, user_id: &str) -> Result<Option<Week>>;
    async fn delete_week(&self, week_id: &str, user_id: &str) -> Result<usize>;
}
