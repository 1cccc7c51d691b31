//! Integration tests for the Diesel category repository against embedded
//! PostgreSQL.
//!
//! A category is stored as a graph, so these cases also cover the cascading
//! foreign keys that remove its tasks, pomodoros and schedules.

mod support;

use chrono::{TimeZone, Utc};
use pomodoro_backend::domain::ports::{OwnedRepository, OwnedRepositoryError};
use pomodoro_backend::domain::{Category, Pomodoro, Schedule, Task, UserId};
use pomodoro_backend::outbound::persistence::{
    DieselCategoryRepository, DieselScheduleRepository, DieselTaskRepository,
};
use rstest::{fixture, rstest};
use support::{PostgresContext, postgres_context};
use uuid::Uuid;

#[fixture]
fn repo_context() -> Option<PostgresContext> {
    postgres_context()
}

fn work_category(owner: &UserId) -> Category {
    let nine = Utc
        .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("timestamp");
    Category {
        id: Uuid::nil(),
        owner: owner.clone(),
        name: "Work".to_owned(),
        description: Some("Office hours".to_owned()),
        tasks: vec![Task {
            id: Uuid::nil(),
            owner: owner.clone(),
            category_id: Uuid::nil(),
            timer_settings_id: None,
            name: "Write report".to_owned(),
            description: None,
            allocated_time_secs: 3_000,
            is_done: false,
            pomodoros: vec![Pomodoro {
                id: Uuid::nil(),
                owner: owner.clone(),
                task_id: Uuid::nil(),
                timer_settings_id: None,
                started_at: nine,
                duration_secs: 1_500,
                comment: Some("focused".to_owned()),
            }],
        }],
        schedules: vec![Schedule {
            id: Uuid::nil(),
            owner: owner.clone(),
            category_id: Uuid::nil(),
            title: "Morning block".to_owned(),
            description: None,
            starts_at: nine,
            ends_at: Utc
                .with_ymd_and_hms(2026, 3, 2, 11, 0, 0)
                .single()
                .expect("timestamp"),
        }],
    }
}

#[rstest]
fn insert_round_trips_the_whole_graph(repo_context: Option<PostgresContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_round_trips_the_whole_graph skipped");
        return;
    };
    let categories = DieselCategoryRepository::new(context.pool.clone());
    let tasks = DieselTaskRepository::new(context.pool.clone());
    let alice = UserId::random();

    context.runtime.block_on(async {
        let stored = categories
            .insert(work_category(&alice))
            .await
            .expect("insert succeeds");
        assert!(!stored.id.is_nil());

        let loaded = categories
            .find_if_owned(&stored.id, &alice)
            .await
            .expect("lookup succeeds")
            .expect("category present");
        assert_eq!(loaded, stored);
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(
            loaded.tasks.first().map(|task| task.pomodoros.len()),
            Some(1)
        );
        assert_eq!(loaded.schedules.len(), 1);

        let nested = tasks.list_for_owner(&alice).await.expect("list succeeds");
        assert_eq!(nested, stored.tasks);
    });
}

#[rstest]
fn find_if_owned_hides_other_users_categories(repo_context: Option<PostgresContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: find_if_owned_hides_other_users_categories skipped");
        return;
    };
    let categories = DieselCategoryRepository::new(context.pool.clone());
    let alice = UserId::random();

    context.runtime.block_on(async {
        let stored = categories
            .insert(work_category(&alice))
            .await
            .expect("insert succeeds");

        let foreign = categories
            .find_if_owned(&stored.id, &UserId::random())
            .await
            .expect("lookup succeeds");
        assert!(foreign.is_none());
        let any = categories
            .find_by_id(&stored.id)
            .await
            .expect("lookup succeeds");
        assert_eq!(any.map(|category| category.owner), Some(alice));
    });
}

#[rstest]
fn update_with_another_owner_changes_nothing(repo_context: Option<PostgresContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_with_another_owner_changes_nothing skipped");
        return;
    };
    let categories = DieselCategoryRepository::new(context.pool.clone());
    let alice = UserId::random();

    context.runtime.block_on(async {
        let stored = categories
            .insert(work_category(&alice))
            .await
            .expect("insert succeeds");

        let mut hijack = stored.clone();
        hijack.owner = UserId::random();
        hijack.name = "Mine now".to_owned();
        let result = categories.update(hijack).await.expect("update runs");
        assert!(result.is_none());

        let mut rename = stored.clone();
        rename.name = "Deep work".to_owned();
        let updated = categories
            .update(rename)
            .await
            .expect("update runs")
            .expect("owner matched");
        assert_eq!(updated.name, "Deep work");
        assert_eq!(updated.tasks, stored.tasks);
        assert_eq!(updated.schedules, stored.schedules);
    });
}

#[rstest]
fn duplicate_id_is_a_conflict(repo_context: Option<PostgresContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_id_is_a_conflict skipped");
        return;
    };
    let categories = DieselCategoryRepository::new(context.pool.clone());
    let alice = UserId::random();

    context.runtime.block_on(async {
        let stored = categories
            .insert(work_category(&alice))
            .await
            .expect("insert succeeds");

        let mut clash = work_category(&alice);
        clash.id = stored.id;
        clash.tasks.clear();
        clash.schedules.clear();
        let err = categories.insert(clash).await.expect_err("duplicate id");
        assert!(matches!(err, OwnedRepositoryError::Conflict { .. }));
    });
}

#[rstest]
fn delete_cascades_to_tasks_pomodoros_and_schedules(repo_context: Option<PostgresContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_cascades_to_tasks_pomodoros_and_schedules skipped");
        return;
    };
    let categories = DieselCategoryRepository::new(context.pool.clone());
    let tasks = DieselTaskRepository::new(context.pool.clone());
    let schedules = DieselScheduleRepository::new(context.pool.clone());
    let alice = UserId::random();

    context.runtime.block_on(async {
        let stored = categories
            .insert(work_category(&alice))
            .await
            .expect("insert succeeds");
        let task_id = stored.tasks.first().map(|task| task.id).expect("nested task");

        let foreign = categories
            .delete_if_owned(&stored.id, &UserId::random())
            .await
            .expect("delete runs");
        assert_eq!(foreign, 0);

        let deleted = categories
            .delete_if_owned(&stored.id, &alice)
            .await
            .expect("delete runs");
        assert_eq!(deleted, 1);

        assert!(
            categories
                .find_by_id(&stored.id)
                .await
                .expect("lookup succeeds")
                .is_none()
        );
        assert!(
            tasks
                .find_by_id(&task_id)
                .await
                .expect("lookup succeeds")
                .is_none()
        );
        assert!(tasks.list_for_owner(&alice).await.expect("list").is_empty());
        assert!(schedules.list_for_owner(&alice).await.expect("list").is_empty());
    });
}
