//! PostgreSQL-backed timer settings repository using Diesel ORM.
//!
//! Deleting a preset clears the reference held by tasks and pomodoros
//! (`ON DELETE SET NULL`) rather than removing them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{OwnedRepository, OwnedRepositoryError};
use crate::domain::{OwnedEntity, TimerSettings, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTimerSettingsRow, TimerSettingsRow, TimerSettingsUpdate};
use super::pool::DbPool;
use super::schema::timer_settings;

/// Diesel-backed implementation of [`OwnedRepository<TimerSettings>`].
#[derive(Clone)]
pub struct DieselTimerSettingsRepository {
    pool: DbPool,
}

impl DieselTimerSettingsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_timer_settings(row: TimerSettingsRow) -> TimerSettings {
    TimerSettings {
        id: row.id,
        owner: UserId::from_uuid(row.user_id),
        name: row.name,
        work_duration_secs: row.work_duration_secs,
        short_break_secs: row.short_break_secs,
        long_break_secs: row.long_break_secs,
        long_break_interval: row.long_break_interval,
        is_active: row.is_active,
    }
}

#[async_trait]
impl OwnedRepository<TimerSettings> for DieselTimerSettingsRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<TimerSettings>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TimerSettingsRow> = timer_settings::table
            .filter(timer_settings::user_id.eq(owner.as_uuid()))
            .order_by((timer_settings::created_at, timer_settings::id))
            .select(TimerSettingsRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_timer_settings).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<TimerSettings>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TimerSettingsRow> = timer_settings::table
            .filter(timer_settings::id.eq(id))
            .select(TimerSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_timer_settings))
    }

    async fn find_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<TimerSettings>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TimerSettingsRow> = timer_settings::table
            .filter(timer_settings::id.eq(id))
            .filter(timer_settings::user_id.eq(owner.as_uuid()))
            .select(TimerSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_timer_settings))
    }

    async fn insert(
        &self,
        mut entity: TimerSettings,
    ) -> Result<TimerSettings, OwnedRepositoryError> {
        entity.assign_missing_ids();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(timer_settings::table)
            .values(&NewTimerSettingsRow {
                id: entity.id,
                user_id: *entity.owner.as_uuid(),
                name: entity.name.as_str(),
                work_duration_secs: entity.work_duration_secs,
                short_break_secs: entity.short_break_secs,
                long_break_secs: entity.long_break_secs,
                long_break_interval: entity.long_break_interval,
                is_active: entity.is_active,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(entity)
    }

    async fn update(
        &self,
        entity: TimerSettings,
    ) -> Result<Option<TimerSettings>, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = TimerSettingsUpdate {
            name: entity.name.as_str(),
            work_duration_secs: entity.work_duration_secs,
            short_break_secs: entity.short_break_secs,
            long_break_secs: entity.long_break_secs,
            long_break_interval: entity.long_break_interval,
            is_active: entity.is_active,
        };
        let row: Option<TimerSettingsRow> = diesel::update(
            timer_settings::table
                .filter(timer_settings::id.eq(entity.id))
                .filter(timer_settings::user_id.eq(entity.owner.as_uuid())),
        )
        .set(&changes)
        .returning(TimerSettingsRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        Ok(row.map(row_to_timer_settings))
    }

    async fn delete_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<u64, OwnedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            timer_settings::table
                .filter(timer_settings::id.eq(id))
                .filter(timer_settings::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}
