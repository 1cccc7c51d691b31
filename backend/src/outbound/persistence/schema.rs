//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Every table carries the owning `user_id`; child tables reference their
//! parent through `(parent_id, user_id)` so a row can only hang under a parent
//! with the same owner.

diesel::table! {
    /// Top-level grouping of tasks and schedules.
    categories (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Varchar>,
        /// Insertion timestamp, used for stable listing order.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named timer presets.
    timer_settings (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        work_duration_secs -> Int4,
        short_break_secs -> Int4,
        long_break_secs -> Int4,
        long_break_interval -> Int4,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tasks (id) {
        id -> Uuid,
        user_id -> Uuid,
        category_id -> Uuid,
        timer_settings_id -> Nullable<Uuid>,
        name -> Varchar,
        description -> Nullable<Varchar>,
        allocated_time_secs -> Int4,
        is_done -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    schedules (id) {
        id -> Uuid,
        user_id -> Uuid,
        category_id -> Uuid,
        title -> Varchar,
        description -> Nullable<Varchar>,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Completed work intervals recorded against a task.
    pomodoros (id) {
        id -> Uuid,
        user_id -> Uuid,
        task_id -> Uuid,
        timer_settings_id -> Nullable<Uuid>,
        started_at -> Timestamptz,
        duration_secs -> Int4,
        comment -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> categories (category_id));
diesel::joinable!(schedules -> categories (category_id));
diesel::joinable!(pomodoros -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    timer_settings,
    tasks,
    schedules,
    pomodoros,
);
