//! Application-wide constants.

/// Maximum number of ACTIVE goals a single owner may hold at once.
pub const MAX_ACTIVE_GOALS_PER_OWNER: i64 = 10;

/// Maximum length of a goal name.
pub const GOAL_NAME_MAX_LEN: usize = 100;

/// Inclusive bounds for a week's overall rating.
pub const MIN_WEEK_RATING: i32 = 1;
pub const MAX_WEEK_RATING: i32 = 5;

/// Prefix for per-partnership realtime channels.
pub const PARTNER_TASKS_CHANNEL_PREFIX: &str = "partner-tasks-";

/// Capacity of the store-notification broadcast channel.
pub const STORE_NOTIFIER_CAPACITY: usize = 64;
