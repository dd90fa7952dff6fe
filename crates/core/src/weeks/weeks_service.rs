use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, Utc, Weekday};
use chrono_tz::Tz;
use futures::Stream;

use crate::calendar;
use crate::constants::{MAX_WEEK_RATING, MIN_WEEK_RATING};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{observe, StoreNotifier, Table};

use super::weeks_model::Week;
use super::weeks_traits::{WeekRepositoryTrait, WeekServiceTrait};

/// Service for week lookup, auto-creation, and review bookkeeping.
pub struct WeekService {
    repository: Arc<dyn WeekRepositoryTrait>,
    notifier: StoreNotifier,
    timezone: Tz,
}

impl WeekService {
    pub fn new(
        repository: Arc<dyn WeekRepositoryTrait>,
        notifier: StoreNotifier,
        timezone: Tz,
    ) -> Self {
        WeekService {
            repository,
            notifier,
            timezone,
        }
    }

    fn validate_rating(rating: i32) -> Result<()> {
        if !(MIN_WEEK_RATING..=MAX_WEEK_RATING).contains(&rating) {
            return Err(Error::Validation(ValidationError::OutOfRange(format!(
                "week rating must be between {MIN_WEEK_RATING} and {MAX_WEEK_RATING}, got {rating}"
            ))));
        }
        Ok(())
    }

    /// Invariant checks for a week row. Violations are caller errors and are
    /// rejected before any write.
    fn validate_week(week: &Week) -> Result<()> {
        calendar::parse_week_id(&week.id)?;
        if week.start_date.weekday() != Weekday::Mon {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "week start {} is not a Monday",
                week.start_date
            ))));
        }
        if week.end_date != week.start_date + Duration::days(6) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "week end {} is not start + 6 days",
                week.end_date
            ))));
        }
        if let Some(rating) = week.overall_rating {
            Self::validate_rating(rating)?;
        }
        Ok(())
    }

    /// Live stream of one user's week row.
    pub fn watch_week(
        &self,
        user_id: &str,
        week_id: &str,
    ) -> impl Stream<Item = Result<Option<Week>>> {
        let repository = self.repository.clone();
        let user_id = user_id.to_string();
        let week_id = week_id.to_string();
        observe(&self.notifier, Table::Weeks, move || {
            repository.get_week(&week_id, &user_id)
        })
    }
}

#[async_trait]
impl WeekServiceTrait for WeekService {
    fn current_week_id(&self) -> String {
        calendar::current_week_id(Utc::now(), self.timezone)
    }

    async fn get_or_create_current_week(&self, user_id: &str) -> Result<Week> {
        let week_id = self.current_week_id();
        if let Some(week) = self.repository.get_week(&week_id, user_id)? {
            return Ok(week);
        }

        let (start_date, end_date) = calendar::week_boundaries(&week_id)?;
        let week = Week {
            id: week_id,
            user_id: user_id.to_string(),
            start_date,
            end_date,
            overall_rating: None,
            review_note: None,
            reviewed_at: None,
            planning_completed_at: None,
        };
        self.repository.insert_week(week).await
    }

    fn get_week(&self, week_id: &str, user_id: &str) -> Result<Option<Week>> {
        self.repository.get_week(week_id, user_id)
    }

    fn get_weeks_for_user(&self, user_id: &str) -> Result<Vec<Week>> {
        self.repository.get_weeks_for_user(user_id)
    }

    async fn save_week(&self, week: Week) -> Result<Week> {
        Self::validate_week(&week)?;
        match self.repository.update_week(week.clone()).await? {
            Some(updated) => Ok(updated),
            None => self.repository.insert_week(week).await,
        }
    }

    async fn update_week_review(
        &self,
        week_id: &str,
        user_id: &str,
        rating: i32,
        review_note: Option<String>,
    ) -> Result<Option<Week>> {
        Self::validate_rating(rating)?;
        let Some(mut week) = self.repository.get_week(week_id, user_id)? else {
            return Ok(None);
        };
        week.overall_rating = Some(rating);
        week.review_note = review_note;
        week.reviewed_at = Some(Utc::now());
        self.repository.update_week(week).await
    }

    async fn mark_planning_completed(&self, week_id: &str, user_id: &str) -> Result<Option<Week>> {
        let Some(mut week) = self.repository.get_week(week_id, user_id)? else {
            return Ok(None);
        };
        week.planning_completed_at = Some(Utc::now());
        self.repository.update_week(week).await
    }

    async fn delete_week(&self, week_id: &str, user_id: &str) -> Result<usize> {
        self.repository.delete_week(week_id, user_id).await
    }
}
