//! Tests for goal domain models.

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use crate::goals::{Goal, GoalStatus, GoalType};

    fn goal_with(goal_type: GoalType, progress: i32) -> Goal {
        let now = Utc::now();
        Goal {
            id: "g-1".to_string(),
            name: "Read more".to_string(),
            icon: "book".to_string(),
            goal_type,
            duration_weeks: None,
            start_week_id: "2026-W01".to_string(),
            owner_id: "user-1".to_string(),
            current_progress: progress,
            current_week_id: "2026-W01".to_string(),
            status: GoalStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_target_value_per_type() {
        assert_eq!(GoalType::WeeklyHabit { target_per_week: 3 }.target_value(), 3);
        assert_eq!(GoalType::RecurringTask.target_value(), 1);
        assert_eq!(GoalType::TargetAmount { target_total: 100 }.target_value(), 100);
    }

    #[test]
    fn test_has_met_target() {
        assert!(!goal_with(GoalType::WeeklyHabit { target_per_week: 3 }, 2).has_met_target());
        assert!(goal_with(GoalType::WeeklyHabit { target_per_week: 3 }, 3).has_met_target());
        assert!(goal_with(GoalType::RecurringTask, 1).has_met_target());
        assert!(goal_with(GoalType::TargetAmount { target_total: 100 }, 120).has_met_target());
    }

    #[test]
    fn test_goal_type_serialization_is_tagged() {
        let json = serde_json::to_string(&GoalType::WeeklyHabit { target_per_week: 3 }).unwrap();
        assert!(json.contains("\"type\":\"WEEKLY_HABIT\""));
        assert!(json.contains("\"targetPerWeek\":3"));

        let back: GoalType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GoalType::WeeklyHabit { target_per_week: 3 });
    }

    #[test]
    fn test_goal_type_storage_round_trip() {
        for goal_type in [
            GoalType::WeeklyHabit { target_per_week: 4 },
            GoalType::RecurringTask,
            GoalType::TargetAmount { target_total: 250 },
        ] {
            let rebuilt =
                GoalType::from_parts(goal_type.kind_str(), goal_type.target_column()).unwrap();
            assert_eq!(rebuilt, goal_type);
        }
    }

    #[test]
    fn test_goal_type_from_parts_rejects_unknown_kind() {
        assert!(GoalType::from_parts("SOMETHING_ELSE", None).is_err());
    }

    #[test]
    fn test_goal_status_round_trip() {
        for status in [GoalStatus::Active, GoalStatus::Completed, GoalStatus::Expired] {
            assert_eq!(GoalStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert_eq!(GoalStatus::default(), GoalStatus::Active);
    }
}
