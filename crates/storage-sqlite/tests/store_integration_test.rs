//! Integration tests against a real on-disk SQLite store.
//!
//! Each test opens a fresh database in a temp directory, runs the embedded
//! migrations, and exercises the repositories through the core services.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use futures::StreamExt;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::mpsc;

use tandem_core::errors::Result;
use tandem_core::events::StoreNotifier;
use tandem_core::goals::{GoalServiceTrait, GoalStatus, GoalType, NewGoal};
use tandem_core::partnerships::{Invite, InviteStatus, Partnership, PartnershipRepositoryTrait};
use tandem_core::sync::{PartnerChangeFeed, PartnerSyncEngine, RemoteChange, SyncState};
use tandem_core::tasks::{
    NewTask, OwnerType, TaskRepositoryTrait, TaskServiceTrait, TaskStatus, TaskUpdate,
};
use tandem_core::weeks::WeekServiceTrait;
use tandem_storage_sqlite::goals::GoalRepository;
use tandem_storage_sqlite::partnerships::PartnershipRepository;
use tandem_storage_sqlite::tasks::TaskRepository;
use tandem_storage_sqlite::weeks::WeekRepository;
use tandem_storage_sqlite::{init, DbPool, WriteHandle};

struct TestStore {
    // held for its Drop: the directory outlives the pool
    _dir: TempDir,
    pool: DbPool,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

fn open_store() -> TestStore {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("tandem.db");
    let (pool, writer) = init(db_path.to_str().expect("utf-8 path")).expect("init db");
    TestStore {
        _dir: dir,
        pool,
        writer,
        notifier: StoreNotifier::new(),
    }
}

fn test_tz() -> Tz {
    "UTC".parse().unwrap()
}

fn task_repository(store: &TestStore) -> Arc<TaskRepository> {
    Arc::new(TaskRepository::new(
        store.pool.clone(),
        store.writer.clone(),
        store.notifier.clone(),
    ))
}

fn task_service(store: &TestStore) -> tandem_core::tasks::TaskService {
    tandem_core::tasks::TaskService::new(task_repository(store), store.notifier.clone(), test_tz())
}

fn goal_service(store: &TestStore) -> tandem_core::goals::GoalService {
    tandem_core::goals::GoalService::new(
        Arc::new(GoalRepository::new(
            store.pool.clone(),
            store.writer.clone(),
            store.notifier.clone(),
        )),
        task_repository(store),
        store.notifier.clone(),
    )
}

fn week_service(store: &TestStore) -> tandem_core::weeks::WeekService {
    tandem_core::weeks::WeekService::new(
        Arc::new(WeekRepository::new(
            store.pool.clone(),
            store.writer.clone(),
            store.notifier.clone(),
        )),
        store.notifier.clone(),
        test_tz(),
    )
}

fn new_task(title: &str, week_id: &str, user: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        notes: None,
        owner_id: user.to_string(),
        owner_type: OwnerType::Own,
        week_id: week_id.to_string(),
        status: None,
        created_by: user.to_string(),
        parent_task_id: None,
        repeat_target: None,
        linked_goal_id: None,
        rolled_from_week_id: None,
        scheduled_date: None,
        deadline: None,
        priority: None,
        labels: Vec::new(),
    }
}

#[tokio::test]
async fn test_task_round_trip_preserves_every_column() {
    let store = open_store();
    let service = task_service(&store);

    let mut input = new_task("Plan the week", "2026-W02", "user-1");
    input.notes = Some("with coffee".to_string());
    input.status = Some(TaskStatus::PendingAcceptance);
    input.repeat_target = Some(3);
    input.scheduled_date = NaiveDate::from_ymd_opt(2026, 1, 6);
    input.deadline = NaiveDate::from_ymd_opt(2026, 1, 10);
    input.priority = Some(2);
    input.labels = vec!["home".to_string(), "deep-work".to_string()];
    input.rolled_from_week_id = Some("2026-W01".to_string());

    let created = service.create_task(input).await.unwrap();
    let loaded = service.get_task(&created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.status, TaskStatus::PendingAcceptance);
    assert_eq!(loaded.labels, vec!["home", "deep-work"]);
    assert_eq!(loaded.scheduled_date, NaiveDate::from_ymd_opt(2026, 1, 6));
}

#[tokio::test]
async fn test_task_visibility_is_scoped_to_owner_or_creator() {
    let store = open_store();
    let service = task_service(&store);

    service.create_task(new_task("Mine", "2026-W02", "user-1")).await.unwrap();
    service.create_task(new_task("Theirs", "2026-W02", "user-2")).await.unwrap();

    let visible = service.get_tasks_for_week("user-1", "2026-W02").unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Mine");
}

#[tokio::test]
async fn test_overdue_and_unscheduled_filters() {
    let store = open_store();
    let service = task_service(&store);

    let mut overdue = new_task("Late", "2026-W01", "user-1");
    overdue.scheduled_date = NaiveDate::from_ymd_opt(2020, 1, 1);
    service.create_task(overdue).await.unwrap();

    let mut done = new_task("Late but done", "2026-W01", "user-1");
    done.scheduled_date = NaiveDate::from_ymd_opt(2020, 1, 1);
    done.status = Some(TaskStatus::Completed);
    service.create_task(done).await.unwrap();

    service.create_task(new_task("Floating", "2026-W01", "user-1")).await.unwrap();

    let overdue = service.get_overdue_tasks("user-1").unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].title, "Late");

    let unscheduled = service.get_unscheduled_tasks("user-1").unwrap();
    assert_eq!(unscheduled.len(), 1);
    assert_eq!(unscheduled[0].title, "Floating");
}

#[tokio::test]
async fn test_task_update_and_not_found_behavior() {
    let store = open_store();
    let service = task_service(&store);
    let task = service.create_task(new_task("Draft", "2026-W02", "user-1")).await.unwrap();

    let updated = service
        .update_task(
            &task.id,
            TaskUpdate {
                title: "Final".to_string(),
                notes: Some("ready".to_string()),
                status: TaskStatus::Completed,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.status, TaskStatus::Completed);
    assert!(updated.updated_at >= task.updated_at);

    let missing = service
        .update_task(
            "no-such-id",
            TaskUpdate {
                title: "x".to_string(),
                notes: None,
                status: TaskStatus::Pending,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_delete_task_cascades_to_subtasks_in_store() {
    let store = open_store();
    let service = task_service(&store);
    let parent = service.create_task(new_task("Parent", "2026-W02", "user-1")).await.unwrap();
    let mut child = new_task("Child", "2026-W02", "user-1");
    child.parent_task_id = Some(parent.id.clone());
    let child = service.create_task(child).await.unwrap();

    assert_eq!(service.delete_task(&parent.id).await.unwrap(), Some(2));
    assert!(service.get_task(&child.id).unwrap().is_none());
}

#[tokio::test]
async fn test_watch_tasks_for_week_sees_repository_writes() {
    let store = open_store();
    let service = task_service(&store);
    let mut stream = Box::pin(service.watch_tasks_for_week("user-1", "2026-W02"));

    assert!(stream.next().await.unwrap().unwrap().is_empty());

    service.create_task(new_task("Live", "2026-W02", "user-1")).await.unwrap();
    let snapshot = stream.next().await.unwrap().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title, "Live");
}

#[tokio::test]
async fn test_week_get_or_create_then_review() {
    let store = open_store();
    let service = week_service(&store);

    let week = service.get_or_create_current_week("user-1").await.unwrap();
    let again = service.get_or_create_current_week("user-1").await.unwrap();
    assert_eq!(week, again);

    let reviewed = service
        .update_week_review(&week.id, "user-1", 4, Some("solid".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reviewed.overall_rating, Some(4));
    assert!(reviewed.reviewed_at.is_some());

    let planned = service
        .mark_planning_completed(&week.id, "user-1")
        .await
        .unwrap()
        .unwrap();
    assert!(planned.planning_completed_at.is_some());
}

#[tokio::test]
async fn test_goal_round_trip_and_auto_completion() {
    let store = open_store();
    let service = goal_service(&store);

    let goal = service
        .create_goal(NewGoal {
            name: "Save for a bike".to_string(),
            icon: "bicycle".to_string(),
            goal_type: GoalType::TargetAmount { target_total: 100 },
            duration_weeks: None,
            start_week_id: "2026-W01".to_string(),
            owner_id: "user-1".to_string(),
        })
        .await
        .unwrap();

    service.increment_progress(&goal.id, 90).await.unwrap();
    service.increment_progress(&goal.id, 10).await.unwrap();

    let loaded = service.get_goal(&goal.id).unwrap().unwrap();
    assert_eq!(loaded.current_progress, 100);
    assert_eq!(loaded.status, GoalStatus::Completed);
    assert_eq!(loaded.goal_type, GoalType::TargetAmount { target_total: 100 });
}

#[tokio::test]
async fn test_weekly_reset_is_idempotent_in_store() {
    let store = open_store();
    let service = goal_service(&store);

    let goal = service
        .create_goal(NewGoal {
            name: "Stretch".to_string(),
            icon: "bolt".to_string(),
            goal_type: GoalType::WeeklyHabit { target_per_week: 5 },
            duration_weeks: None,
            start_week_id: "2026-W01".to_string(),
            owner_id: "user-1".to_string(),
        })
        .await
        .unwrap();
    service.increment_progress(&goal.id, 4).await.unwrap();

    assert_eq!(service.process_weekly_resets("2026-W02").await.unwrap(), 1);
    assert_eq!(service.process_weekly_resets("2026-W02").await.unwrap(), 0);

    let history = service.get_progress_history(&goal.id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].progress_value, 4);
    assert_eq!(history[0].target_value, 5);
    assert_eq!(history[0].week_id, "2026-W01");

    let loaded = service.get_goal(&goal.id).unwrap().unwrap();
    assert_eq!(loaded.current_progress, 0);
    assert_eq!(loaded.current_week_id, "2026-W02");
}

#[tokio::test]
async fn test_goal_deletion_unlinks_tasks_in_store() {
    let store = open_store();
    let goals = goal_service(&store);
    let tasks = task_service(&store);

    let goal = goals
        .create_goal(NewGoal {
            name: "Read".to_string(),
            icon: "book".to_string(),
            goal_type: GoalType::RecurringTask,
            duration_weeks: None,
            start_week_id: "2026-W01".to_string(),
            owner_id: "user-1".to_string(),
        })
        .await
        .unwrap();

    let mut linked = new_task("Read chapter 1", "2026-W01", "user-1");
    linked.linked_goal_id = Some(goal.id.clone());
    let linked = tasks.create_task(linked).await.unwrap();

    goals.delete_goal(&goal.id).await.unwrap();

    let task = tasks.get_task(&linked.id).unwrap().unwrap();
    assert!(task.linked_goal_id.is_none());
}

#[tokio::test]
async fn test_partnership_and_invite_persistence() {
    let store = open_store();
    let repo = PartnershipRepository::new(
        store.pool.clone(),
        store.writer.clone(),
        store.notifier.clone(),
    );

    let partnership = Partnership::new(
        "p-1".to_string(),
        "zoe".to_string(),
        "amir".to_string(),
        chrono::Utc::now(),
    );
    repo.upsert_partnership(partnership.clone()).await.unwrap();

    let loaded = repo.get_partnership_for_user("zoe").unwrap().unwrap();
    assert_eq!(loaded.user1_id, "amir");
    assert_eq!(loaded.partner_of("zoe"), Some("amir"));

    let invite = Invite {
        code: "XK42PF".to_string(),
        creator_id: "amir".to_string(),
        created_at: chrono::Utc::now(),
        expires_at: chrono::Utc::now() + chrono::Duration::hours(24),
        accepted_by: None,
        accepted_at: None,
        status: InviteStatus::Pending,
    };
    repo.upsert_invite(invite).await.unwrap();
    let loaded = repo.get_invite_by_code("XK42PF").unwrap().unwrap();
    assert_eq!(loaded.status, InviteStatus::Pending);
}

// --- Sync engine against the real store ---

#[derive(Clone, Default)]
struct ScriptedFeed {
    sender: Arc<std::sync::Mutex<Option<mpsc::Sender<RemoteChange>>>>,
}

#[async_trait]
impl PartnerChangeFeed for ScriptedFeed {
    async fn subscribe(&self, _channel: &str) -> Result<mpsc::Receiver<RemoteChange>> {
        let (tx, rx) = mpsc::channel(16);
        *self.sender.lock().unwrap() = Some(tx);
        Ok(rx)
    }
}

fn remote_task(id: &str, owner: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "owner_id": owner,
        "owner_type": "SELF",
        "week_id": "2026-W02",
        "status": "PENDING",
        "created_by": owner,
        "repeat_target": null,
        "repeat_completed": 0,
        "linked_goal_id": null,
        "created_at": "2026-01-05T09:00:00Z",
        "updated_at": "2026-01-05T09:00:00Z",
    })
}

async fn wait_for<F: Fn() -> bool>(condition: F) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn test_sync_engine_merges_partner_events_into_store() {
    let store = open_store();
    let repo = task_repository(&store);
    let feed = ScriptedFeed::default();
    let engine = PartnerSyncEngine::new(repo.clone(), Arc::new(feed.clone()));

    engine.start("user-1", "partner-9").await;
    assert_eq!(engine.state().await, SyncState::Subscribed);

    let tx = feed.sender.lock().unwrap().clone().unwrap();
    tx.send(RemoteChange::Insert {
        record: remote_task("r-1", "partner-9", "Partner's run"),
    })
    .await
    .unwrap();
    // foreign-owner event must be discarded
    tx.send(RemoteChange::Insert {
        record: remote_task("r-2", "intruder", "Not ours"),
    })
    .await
    .unwrap();
    // last write wins on the same primary key
    tx.send(RemoteChange::Update {
        record: remote_task("r-1", "partner-9", "Partner's long run"),
    })
    .await
    .unwrap();

    wait_for(|| {
        repo.get_task("r-1")
            .unwrap()
            .map(|t| t.title == "Partner's long run")
            .unwrap_or(false)
    })
    .await;
    assert!(repo.get_task("r-2").unwrap().is_none());

    tx.send(RemoteChange::Delete {
        old_record: json!({ "id": "r-1", "owner_id": "partner-9" }),
    })
    .await
    .unwrap();
    wait_for(|| repo.get_task("r-1").unwrap().is_none()).await;

    engine.stop().await;
    assert_eq!(engine.state().await, SyncState::Stopped);
}
