//! PostgreSQL-backed task repository using Diesel ORM.
//!
//! Tasks are stored with their pomodoros. The graph helpers here are shared
//! with the category adapter, which nests tasks under each category.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{OwnedRepository, OwnedRepositoryError};
use crate::domain::{OwnedEntity, Pomodoro, Task, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPomodoroRow, NewTaskRow, PomodoroRow, TaskRow, TaskUpdate};
use super::pool::DbPool;
use super::schema::{pomodoros, tasks};

/// Diesel-backed implementation of [`OwnedRepository<Task>`].
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_pomodoro(row: PomodoroRow) -> Pomodoro {
    Pomodoro {
        id: row.id,
        owner: UserId::from_uuid(row.user_id),
        task_id: row.task_id,
        timer_settings_id: row.timer_settings_id,
        started_at: row.started_at,
        duration_secs: row.duration_secs,
        comment: row.comment,
    }
}

fn row_to_task(row: TaskRow, pomodoros: Vec<Pomodoro>) -> Task {
    Task {
        id: row.id,
        owner: UserId::from_uuid(row.user_id),
        category_id: row.category_id,
        timer_settings_id: row.timer_settings_id,
        name: row.name,
        description: row.description,
        allocated_time_secs: row.allocated_time_secs,
        is_done: row.is_done,
        pomodoros,
    }
}

/// Load the pomodoros of `rows` and assemble full task graphs.
pub(super) async fn attach_pomodoros(
    conn: &mut AsyncPgConnection,
    rows: Vec<TaskRow>,
) -> QueryResult<Vec<Task>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let task_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let pomodoro_rows: Vec<PomodoroRow> = pomodoros::table
        .filter(pomodoros::task_id.eq_any(&task_ids))
        .order_by((pomodoros::created_at, pomodoros::id))
        .select(PomodoroRow::as_select())
        .load(conn)
        .await?;

    let mut by_task: HashMap<Uuid, Vec<Pomodoro>> = HashMap::new();
    for row in pomodoro_rows {
        by_task.entry(row.task_id).or_default().push(row_to_pomodoro(row));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let children = by_task.remove(&row.id).unwrap_or_default();
            row_to_task(row, children)
        })
        .collect())
}

/// Insert a task row followed by its pomodoros.
pub(super) async fn insert_task_graph(
    conn: &mut AsyncPgConnection,
    task: &Task,
) -> QueryResult<()> {
    let owner = *task.owner.as_uuid();
    diesel::insert_into(tasks::table)
        .values(&NewTaskRow {
            id: task.id,
            user_id: owner,
            category_id: task.category_id,
            timer_settings_id: task.timer_settings_id,
            name: task.name.as_str(),
            description: task.description.as_deref(),
            allocated_time_secs: task.allocated_time_secs,
            is_done: task.is_done,
        })
        .execute(conn)
        .await?;

    if task.pomodoros.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewPomodoroRow<'_>> = task
        .pomodoros
        .iter()
        .map(|pomodoro| NewPomodoroRow {
            id: pomodoro.id,
            user_id: owner,
            task_id: task.id,
            timer_settings_id: pomodoro.timer_settings_id,
            started_at: pomodoro.started_at,
            duration_secs: pomodoro.duration_secs,
            comment: pomodoro.comment.as_deref(),
        })
        .collect();
    diesel::insert_into(pomodoros::table)
        .values(&rows)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl OwnedRepository<Task> for DieselTaskRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::user_id.eq(owner.as_uuid()))
            .order_by((tasks::created_at, tasks::id))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        attach_pomodoros(&mut conn, rows)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Task>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TaskRow> = tasks::table
            .filter(tasks::id.eq(id))
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let tasks = attach_pomodoros(&mut conn, row.into_iter().collect())
            .await
            .map_err(map_diesel_error)?;
        Ok(tasks.into_iter().next())
    }

    async fn find_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<Task>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TaskRow> = tasks::table
            .filter(tasks::id.eq(id))
            .filter(tasks::user_id.eq(owner.as_uuid()))
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let tasks = attach_pomodoros(&mut conn, row.into_iter().collect())
            .await
            .map_err(map_diesel_error)?;
        Ok(tasks.into_iter().next())
    }

    async fn insert(&self, mut entity: Task) -> Result<Task, OwnedRepositoryError> {
        entity.assign_missing_ids();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                insert_task_graph(conn, &entity).await?;
                Ok(entity)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(&self, entity: Task) -> Result<Option<Task>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let changes = TaskUpdate {
                    category_id: entity.category_id,
                    timer_settings_id: entity.timer_settings_id,
                    name: entity.name.as_str(),
                    description: entity.description.as_deref(),
                    allocated_time_secs: entity.allocated_time_secs,
                    is_done: entity.is_done,
                };
                let row: Option<TaskRow> = diesel::update(
                    tasks::table
                        .filter(tasks::id.eq(entity.id))
                        .filter(tasks::user_id.eq(entity.owner.as_uuid())),
                )
                .set(&changes)
                .returning(TaskRow::as_returning())
                .get_result(conn)
                .await
                .optional()?;
                let tasks = attach_pomodoros(conn, row.into_iter().collect()).await?;
                Ok(tasks.into_iter().next())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<u64, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Pomodoros go with the task through the cascading foreign key.
        let deleted = diesel::delete(
            tasks::table
                .filter(tasks::id.eq(id))
                .filter(tasks::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}
