#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Datelike, Duration, NaiveDate, Weekday};
    use chrono_tz::Tz;

    use crate::errors::Result;
    use crate::events::StoreNotifier;
    use crate::weeks::{Week, WeekRepositoryTrait, WeekService, WeekServiceTrait};

    // --- Mock WeekRepository ---

    #[derive(Clone, Default)]
    struct MockWeekRepository {
        weeks: Arc<Mutex<Vec<Week>>>,
    }

    #[async_trait]
    impl WeekRepositoryTrait for MockWeekRepository {
        fn get_week(&self, week_id: &str, user_id: &str) -> Result<Option<Week>> {
            Ok(self
                .weeks
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id == week_id && w.user_id == user_id)
                .cloned())
        }

        fn get_weeks_for_user(&self, user_id: &str) -> Result<Vec<Week>> {
            Ok(self
                .weeks
                .lock()
                .unwrap()
                .iter()
                .filter(|w| w.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn insert_week(&self, week: Week) -> Result<Week> {
            self.weeks.lock().unwrap().push(week.clone());
            Ok(week)
        }

        async fn update_week(&self, week: Week) -> Result<Option<Week>> {
            let mut weeks = self.weeks.lock().unwrap();
            match weeks
                .iter_mut()
                .find(|w| w.id == week.id && w.user_id == week.user_id)
            {
                Some(existing) => {
                    *existing = week.clone();
                    Ok(Some(week))
                }
                None => Ok(None),
            }
        }

        async fn delete_week(&self, week_id: &str, user_id: &str) -> Result<usize> {
            let mut weeks = self.weeks.lock().unwrap();
            let before = weeks.len();
            weeks.retain(|w| !(w.id == week_id && w.user_id == user_id));
            Ok(before - weeks.len())
        }
    }

    fn service() -> WeekService {
        let tz: Tz = "UTC".parse().unwrap();
        WeekService::new(
            Arc::new(MockWeekRepository::default()),
            StoreNotifier::new(),
            tz,
        )
    }

    fn valid_week(user_id: &str) -> Week {
        Week {
            id: "2026-W02".to_string(),
            user_id: user_id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            overall_rating: None,
            review_note: None,
            reviewed_at: None,
            planning_completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_or_create_current_week_creates_once() {
        let service = service();

        let created = service.get_or_create_current_week("user-1").await.unwrap();
        assert_eq!(created.id, service.current_week_id());
        assert_eq!(created.start_date.weekday(), Weekday::Mon);
        assert_eq!(created.end_date, created.start_date + Duration::days(6));
        assert!(created.overall_rating.is_none());
        assert!(created.reviewed_at.is_none());
        assert!(created.planning_completed_at.is_none());

        // second call returns the stored row, not a fresh one
        let again = service.get_or_create_current_week("user-1").await.unwrap();
        assert_eq!(again, created);
        assert_eq!(service.get_weeks_for_user("user-1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_week_rejects_non_monday_start() {
        let service = service();
        let mut week = valid_week("user-1");
        week.start_date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        week.end_date = week.start_date + Duration::days(6);
        assert!(service.save_week(week).await.is_err());
    }

    #[tokio::test]
    async fn test_save_week_rejects_wrong_end_date() {
        let service = service();
        let mut week = valid_week("user-1");
        week.end_date = week.start_date + Duration::days(5);
        assert!(service.save_week(week).await.is_err());
    }

    #[tokio::test]
    async fn test_save_week_rejects_out_of_range_rating() {
        let service = service();
        let mut week = valid_week("user-1");
        week.overall_rating = Some(6);
        assert!(service.save_week(week.clone()).await.is_err());
        week.overall_rating = Some(0);
        assert!(service.save_week(week).await.is_err());
    }

    #[tokio::test]
    async fn test_save_week_upserts() {
        let service = service();
        let week = valid_week("user-1");
        service.save_week(week.clone()).await.unwrap();

        let mut updated = week.clone();
        updated.overall_rating = Some(4);
        service.save_week(updated).await.unwrap();

        let stored = service.get_week("2026-W02", "user-1").unwrap().unwrap();
        assert_eq!(stored.overall_rating, Some(4));
        assert_eq!(service.get_weeks_for_user("user-1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_week_review_stamps_reviewed_at() {
        let service = service();
        service.save_week(valid_week("user-1")).await.unwrap();

        let reviewed = service
            .update_week_review("2026-W02", "user-1", 5, Some("great week".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.overall_rating, Some(5));
        assert_eq!(reviewed.review_note.as_deref(), Some("great week"));
        assert!(reviewed.reviewed_at.is_some());
    }

    #[tokio::test]
    async fn test_update_week_review_missing_week_returns_none() {
        let service = service();
        let result = service
            .update_week_review("2026-W09", "user-1", 3, None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_week_review_validates_before_lookup() {
        let service = service();
        service.save_week(valid_week("user-1")).await.unwrap();
        assert!(service
            .update_week_review("2026-W02", "user-1", 9, None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_mark_planning_completed() {
        let service = service();
        service.save_week(valid_week("user-1")).await.unwrap();

        let planned = service
            .mark_planning_completed("2026-W02", "user-1")
            .await
            .unwrap()
            .unwrap();
        assert!(planned.planning_completed_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_week() {
        let service = service();
        service.save_week(valid_week("user-1")).await.unwrap();
        assert_eq!(service.delete_week("2026-W02", "user-1").await.unwrap(), 1);
        assert!(service.get_week("2026-W02", "user-1").unwrap().is_none());
    }
}
