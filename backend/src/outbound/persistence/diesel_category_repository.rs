//! PostgreSQL-backed category repository using Diesel ORM.
//!
//! A category is read and written as a whole graph: its tasks (with their
//! pomodoros) and its schedules. Inserts run in one transaction; deletes rely
//! on the cascading foreign keys declared in the migrations.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{OwnedRepository, OwnedRepositoryError};
use crate::domain::{Category, OwnedEntity, Schedule, Task, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_schedule_repository::{insert_schedules, row_to_schedule};
use super::diesel_task_repository::{attach_pomodoros, insert_task_graph};
use super::models::{CategoryRow, CategoryUpdate, NewCategoryRow, ScheduleRow, TaskRow};
use super::pool::DbPool;
use super::schema::{categories, schedules, tasks};

/// Diesel-backed implementation of [`OwnedRepository<Category>`].
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Load tasks and schedules for `rows` and assemble category graphs.
async fn load_graphs(
    conn: &mut AsyncPgConnection,
    rows: Vec<CategoryRow>,
) -> QueryResult<Vec<Category>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let category_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let task_rows: Vec<TaskRow> = tasks::table
        .filter(tasks::category_id.eq_any(&category_ids))
        .order_by((tasks::created_at, tasks::id))
        .select(TaskRow::as_select())
        .load(conn)
        .await?;
    let mut tasks_by_category: HashMap<Uuid, Vec<Task>> = HashMap::new();
    for task in attach_pomodoros(conn, task_rows).await? {
        tasks_by_category
            .entry(task.category_id)
            .or_default()
            .push(task);
    }

    let schedule_rows: Vec<ScheduleRow> = schedules::table
        .filter(schedules::category_id.eq_any(&category_ids))
        .order_by((schedules::created_at, schedules::id))
        .select(ScheduleRow::as_select())
        .load(conn)
        .await?;
    let mut schedules_by_category: HashMap<Uuid, Vec<Schedule>> = HashMap::new();
    for row in schedule_rows {
        schedules_by_category
            .entry(row.category_id)
            .or_default()
            .push(row_to_schedule(row));
    }

    Ok(rows
        .into_iter()
        .map(|row| Category {
            id: row.id,
            owner: UserId::from_uuid(row.user_id),
            name: row.name,
            description: row.description,
            tasks: tasks_by_category.remove(&row.id).unwrap_or_default(),
            schedules: schedules_by_category.remove(&row.id).unwrap_or_default(),
        })
        .collect())
}

async fn insert_graph(conn: &mut AsyncPgConnection, category: &Category) -> QueryResult<()> {
    diesel::insert_into(categories::table)
        .values(&NewCategoryRow {
            id: category.id,
            user_id: *category.owner.as_uuid(),
            name: category.name.as_str(),
            description: category.description.as_deref(),
        })
        .execute(conn)
        .await?;
    for task in &category.tasks {
        insert_task_graph(conn, task).await?;
    }
    insert_schedules(conn, &category.schedules).await
}

#[async_trait]
impl OwnedRepository<Category> for DieselCategoryRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Category>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = *owner.as_uuid();
        conn.transaction(|conn| {
            async move {
                let rows: Vec<CategoryRow> = categories::table
                    .filter(categories::user_id.eq(owner))
                    .order_by((categories::created_at, categories::id))
                    .select(CategoryRow::as_select())
                    .load(conn)
                    .await?;
                load_graphs(conn, rows).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Category>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *id;
        conn.transaction(|conn| {
            async move {
                let row: Option<CategoryRow> = categories::table
                    .filter(categories::id.eq(id))
                    .select(CategoryRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                let graphs = load_graphs(conn, row.into_iter().collect()).await?;
                Ok(graphs.into_iter().next())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<Category>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (id, owner) = (*id, *owner.as_uuid());
        conn.transaction(|conn| {
            async move {
                let row: Option<CategoryRow> = categories::table
                    .filter(categories::id.eq(id))
                    .filter(categories::user_id.eq(owner))
                    .select(CategoryRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                let graphs = load_graphs(conn, row.into_iter().collect()).await?;
                Ok(graphs.into_iter().next())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, mut entity: Category) -> Result<Category, OwnedRepositoryError> {
        entity.assign_missing_ids();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                insert_graph(conn, &entity).await?;
                Ok(entity)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(&self, entity: Category) -> Result<Option<Category>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let changes = CategoryUpdate {
                    name: entity.name.as_str(),
                    description: entity.description.as_deref(),
                };
                let row: Option<CategoryRow> = diesel::update(
                    categories::table
                        .filter(categories::id.eq(entity.id))
                        .filter(categories::user_id.eq(entity.owner.as_uuid())),
                )
                .set(&changes)
                .returning(CategoryRow::as_returning())
                .get_result(conn)
                .await
                .optional()?;
                let graphs = load_graphs(conn, row.into_iter().collect()).await?;
                Ok(graphs.into_iter().next())
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
        let deleted = diesel::delete(
            categories::table
                .filter(categories::id.eq(id))
                .filter(categories::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}
