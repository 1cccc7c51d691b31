//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Read rows select every column except
//! `created_at`; insert rows borrow from the domain entity being written.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, pomodoros, schedules, tasks, timer_settings};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Scalar columns rewritten by an update; `None` clears the description.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CategoryUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Timer settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = timer_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TimerSettingsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub work_duration_secs: i32,
    pub short_break_secs: i32,
    pub long_break_secs: i32,
    pub long_break_interval: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = timer_settings)]
pub(crate) struct NewTimerSettingsRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub work_duration_secs: i32,
    pub short_break_secs: i32,
    pub long_break_secs: i32,
    pub long_break_interval: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = timer_settings)]
pub(crate) struct TimerSettingsUpdate<'a> {
    pub name: &'a str,
    pub work_duration_secs: i32,
    pub short_break_secs: i32,
    pub long_break_secs: i32,
    pub long_break_interval: i32,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub timer_settings_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub allocated_time_secs: i32,
    pub is_done: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub timer_settings_id: Option<Uuid>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub allocated_time_secs: i32,
    pub is_done: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TaskUpdate<'a> {
    pub category_id: Uuid,
    pub timer_settings_id: Option<Uuid>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub allocated_time_secs: i32,
    pub is_done: bool,
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScheduleRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schedules)]
pub(crate) struct NewScheduleRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schedules)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ScheduleUpdate<'a> {
    pub category_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Pomodoros
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pomodoros)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PomodoroRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub timer_settings_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub duration_secs: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pomodoros)]
pub(crate) struct NewPomodoroRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub timer_settings_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub duration_secs: i32,
    pub comment: Option<&'a str>,
}
