//! Per-user timer presets.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::NAME_MAX;
use super::validation::{self, FieldError};
use crate::domain::mapping::{OwnerVisibility, Representation};
use crate::domain::ownership::{OwnedEntity, fill_id};
use crate::domain::UserId;

pub const WORK_DURATION_RANGE: (i32, i32) = (60, 7_200);
pub const BREAK_RANGE: (i32, i32) = (60, 3_600);
pub const LONG_BREAK_INTERVAL_RANGE: (i32, i32) = (1, 12);

/// Durations are stored in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    pub id: Uuid,
    pub owner: UserId,
    pub name: String,
    pub work_duration_secs: i32,
    pub short_break_secs: i32,
    pub long_break_secs: i32,
    /// Number of work rounds between long breaks.
    pub long_break_interval: i32,
    pub is_active: bool,
}

impl OwnedEntity for TimerSettings {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.owner
    }

    fn assign_missing_ids(&mut self) {
        fill_id(&mut self.id);
    }
}

/// Client shape of [`TimerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettingsRepresentation {
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub id: Uuid,
    #[serde(default, skip_deserializing, skip_serializing_if = "Uuid::is_nil")]
    pub app_user_id: Uuid,
    #[schema(example = "Classic")]
    pub name: String,
    #[schema(example = 1500)]
    pub work_duration: i32,
    #[schema(example = 300)]
    pub short_break: i32,
    #[schema(example = 900)]
    pub long_break: i32,
    #[schema(example = 4)]
    pub long_break_interval: i32,
    #[serde(default)]
    pub is_active: bool,
}

impl Representation for TimerSettingsRepresentation {
    type Entity = TimerSettings;

    const KIND: &'static str = "timersettings";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_entity(entity: &TimerSettings, visibility: OwnerVisibility) -> Self {
        Self {
            id: entity.id,
            app_user_id: visibility.project(&entity.owner),
            name: entity.name.clone(),
            work_duration: entity.work_duration_secs,
            short_break: entity.short_break_secs,
            long_break: entity.long_break_secs,
            long_break_interval: entity.long_break_interval,
            is_active: entity.is_active,
        }
    }

    fn into_entity(self, owner: &UserId) -> TimerSettings {
        TimerSettings {
            id: self.id,
            owner: owner.clone(),
            name: self.name,
            work_duration_secs: self.work_duration,
            short_break_secs: self.short_break,
            long_break_secs: self.long_break,
            long_break_interval: self.long_break_interval,
            is_active: self.is_active,
        }
    }

    fn validate(&self) -> Result<(), FieldError> {
        let (work_min, work_max) = WORK_DURATION_RANGE;
        let (break_min, break_max) = BREAK_RANGE;
        let (interval_min, interval_max) = LONG_BREAK_INTERVAL_RANGE;
        validation::text("name", &self.name, 1, NAME_MAX)?;
        validation::range("workDuration", self.work_duration, work_min, work_max)?;
        validation::range("shortBreak", self.short_break, break_min, break_max)?;
        validation::range("longBreak", self.long_break, break_min, break_max)?;
        validation::range(
            "longBreakInterval",
            self.long_break_interval,
            interval_min,
            interval_max,
        )
    }
}
