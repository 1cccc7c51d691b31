//! Mapper and validation coverage across the resource kinds.

use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::{OwnedEntity, OwnerVisibility, Representation, UserId};

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn pomodoro() -> PomodoroRepresentation {
    PomodoroRepresentation {
        id: Uuid::nil(),
        app_user_id: Uuid::nil(),
        task_id: Uuid::nil(),
        timer_settings_id: None,
        started_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().expect("valid time"),
        duration: 1_500,
        comment: Some("deep work".to_owned()),
    }
}

fn task(name: &str) -> TaskRepresentation {
    TaskRepresentation {
        id: Uuid::nil(),
        app_user_id: Uuid::nil(),
        category_id: Uuid::nil(),
        timer_settings_id: None,
        name: name.to_owned(),
        description: None,
        allocated_time: 3_600,
        is_done: false,
        pomodoros: vec![pomodoro(), pomodoro()],
    }
}

fn schedule() -> ScheduleRepresentation {
    let starts_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).single().expect("valid time");
    ScheduleRepresentation {
        id: Uuid::nil(),
        app_user_id: Uuid::nil(),
        category_id: Uuid::nil(),
        title: "Morning".to_owned(),
        description: Some("focus block".to_owned()),
        starts_at,
        ends_at: starts_at + Duration::hours(2),
    }
}

fn category() -> CategoryRepresentation {
    CategoryRepresentation {
        id: Uuid::nil(),
        app_user_id: Uuid::nil(),
        name: "Work".to_owned(),
        description: Some("day job".to_owned()),
        tasks: vec![task("report"), task("review")],
        schedules: vec![schedule()],
    }
}

fn timer_settings() -> TimerSettingsRepresentation {
    TimerSettingsRepresentation {
        id: Uuid::nil(),
        app_user_id: Uuid::nil(),
        name: "Classic".to_owned(),
        work_duration: 1_500,
        short_break: 300,
        long_break: 900,
        long_break_interval: 4,
        is_active: true,
    }
}

#[rstest]
fn category_round_trip_preserves_scalars_and_nested_sizes(owner: UserId) {
    let submitted = category();
    let entity = submitted.clone().into_entity(&owner);
    let mapped = CategoryRepresentation::from_entity(&entity, OwnerVisibility::Include);

    assert_eq!(mapped.name, submitted.name);
    assert_eq!(mapped.description, submitted.description);
    assert_eq!(mapped.app_user_id, *owner.as_uuid());
    assert_eq!(mapped.tasks.len(), 2);
    assert_eq!(mapped.schedules.len(), 1);
    assert!(mapped.tasks.iter().all(|t| t.pomodoros.len() == 2));
}

#[rstest]
fn into_entity_stamps_owner_on_every_descendant(owner: UserId) {
    let entity = category().into_entity(&owner);

    assert_eq!(entity.owner(), &owner);
    for task in &entity.tasks {
        assert_eq!(task.owner, owner);
        assert!(task.pomodoros.iter().all(|p| p.owner == owner));
    }
    assert!(entity.schedules.iter().all(|s| s.owner == owner));
}

#[rstest]
fn scrub_hides_owner_throughout_the_graph(owner: UserId) {
    let entity = category().into_entity(&owner);
    let mapped = CategoryRepresentation::from_entity(&entity, OwnerVisibility::Scrub);

    assert!(mapped.app_user_id.is_nil());
    assert!(mapped.tasks.iter().all(|t| t.app_user_id.is_nil()));
    assert!(
        mapped
            .tasks
            .iter()
            .flat_map(|t| t.pomodoros.iter())
            .all(|p| p.app_user_id.is_nil())
    );

    let json = serde_json::to_value(&mapped).expect("serialise");
    assert!(json.get("appUserId").is_none());
}

#[rstest]
fn client_supplied_owner_is_ignored() {
    let attacker = Uuid::new_v4();
    let body = serde_json::json!({ "name": "Work", "appUserId": attacker });
    let parsed: CategoryRepresentation = serde_json::from_value(body).expect("deserialise");

    assert!(parsed.app_user_id.is_nil());
    assert!(parsed.tasks.is_empty());
}

#[rstest]
fn assign_missing_ids_links_children_to_parents(owner: UserId) {
    let mut entity = category().into_entity(&owner);
    entity.assign_missing_ids();

    assert!(!entity.id.is_nil());
    for task in &entity.tasks {
        assert!(!task.id.is_nil());
        assert_eq!(task.category_id, entity.id);
        assert!(task.pomodoros.iter().all(|p| p.task_id == task.id));
    }
    assert!(entity.schedules.iter().all(|s| s.category_id == entity.id));
}

#[rstest]
fn timer_settings_round_trip(owner: UserId) {
    let submitted = timer_settings();
    let mapped = TimerSettingsRepresentation::from_entity(
        &submitted.clone().into_entity(&owner),
        OwnerVisibility::Include,
    );
    assert_eq!(
        mapped,
        TimerSettingsRepresentation {
            app_user_id: *owner.as_uuid(),
            ..submitted
        }
    );
}

#[rstest]
fn category_validation_reports_nested_paths() {
    let mut submitted = category();
    submitted.tasks[1].pomodoros[0].duration = 0;

    let err = submitted.validate().expect_err("zero duration is invalid");
    assert_eq!(err.field(), "tasks[1].pomodoros[0].duration");
}

#[rstest]
fn nested_tasks_do_not_need_a_category_id() {
    assert!(category().validate().is_ok());
}

#[rstest]
fn top_level_task_requires_category_id() {
    let err = task("report").validate().expect_err("missing category");
    assert_eq!(err.field(), "categoryId");

    let linked = TaskRepresentation {
        category_id: Uuid::new_v4(),
        ..task("report")
    };
    assert!(linked.validate().is_ok());
}

#[rstest]
fn schedule_must_not_end_before_it_starts() {
    let mut submitted = ScheduleRepresentation {
        category_id: Uuid::new_v4(),
        ..schedule()
    };
    submitted.ends_at = submitted.starts_at - Duration::minutes(1);

    let err = submitted.validate().expect_err("inverted range");
    assert_eq!(err.field(), "endsAt");
}

#[rstest]
#[case(59, 300, 900, 4, "workDuration")]
#[case(1_500, 3_601, 900, 4, "shortBreak")]
#[case(1_500, 300, 30, 4, "longBreak")]
#[case(1_500, 300, 900, 13, "longBreakInterval")]
fn timer_settings_bounds(
    #[case] work: i32,
    #[case] short_break: i32,
    #[case] long_break: i32,
    #[case] interval: i32,
    #[case] field: &str,
) {
    let submitted = TimerSettingsRepresentation {
        work_duration: work,
        short_break,
        long_break,
        long_break_interval: interval,
        ..timer_settings()
    };
    let err = submitted.validate().expect_err("out of range");
    assert_eq!(err.field(), field);
}

#[rstest]
fn pomodoro_duration_is_capped_at_one_day() {
    let submitted = PomodoroRepresentation {
        duration: MAX_POMODORO_SECONDS + 1,
        ..pomodoro()
    };
    assert!(submitted.validate().is_err());
}
