//! PostgreSQL-backed schedule repository using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{OwnedRepository, OwnedRepositoryError};
use crate::domain::{OwnedEntity, Schedule, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewScheduleRow, ScheduleRow, ScheduleUpdate};
use super::pool::DbPool;
use super::schema::schedules;

/// Diesel-backed implementation of [`OwnedRepository<Schedule>`].
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(super) fn row_to_schedule(row: ScheduleRow) -> Schedule {
    Schedule {
        id: row.id,
        owner: UserId::from_uuid(row.user_id),
        category_id: row.category_id,
        title: row.title,
        description: row.description,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
    }
}

pub(super) async fn insert_schedules(
    conn: &mut AsyncPgConnection,
    items: &[Schedule],
) -> QueryResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewScheduleRow<'_>> = items
        .iter()
        .map(|schedule| NewScheduleRow {
            id: schedule.id,
            user_id: *schedule.owner.as_uuid(),
            category_id: schedule.category_id,
            title: schedule.title.as_str(),
            description: schedule.description.as_deref(),
            starts_at: schedule.starts_at,
            ends_at: schedule.ends_at,
        })
        .collect();
    diesel::insert_into(schedules::table)
        .values(&rows)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl OwnedRepository<Schedule> for DieselScheduleRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Schedule>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ScheduleRow> = schedules::table
            .filter(schedules::user_id.eq(owner.as_uuid()))
            .order_by((schedules::created_at, schedules::id))
            .select(ScheduleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_schedule).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Schedule>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ScheduleRow> = schedules::table
            .filter(schedules::id.eq(id))
            .select(ScheduleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_schedule))
    }

    async fn find_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<Schedule>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ScheduleRow> = schedules::table
            .filter(schedules::id.eq(id))
            .filter(schedules::user_id.eq(owner.as_uuid()))
            .select(ScheduleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_schedule))
    }

    async fn insert(&self, mut entity: Schedule) -> Result<Schedule, OwnedRepositoryError> {
        entity.assign_missing_ids();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        insert_schedules(&mut conn, std::slice::from_ref(&entity))
            .await
            .map_err(map_diesel_error)?;
        Ok(entity)
    }

    async fn update(&self, entity: Schedule) -> Result<Option<Schedule>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ScheduleUpdate {
            category_id: entity.category_id,
            title: entity.title.as_str(),
            description: entity.description.as_deref(),
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
        };
        let row: Option<ScheduleRow> = diesel::update(
            schedules::table
                .filter(schedules::id.eq(entity.id))
                .filter(schedules::user_id.eq(entity.owner.as_uuid())),
        )
        .set(&changes)
        .returning(ScheduleRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(row_to_schedule))
    }

    async fn delete_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<u64, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            schedules::table
                .filter(schedules::id.eq(id))
                .filter(schedules::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}
