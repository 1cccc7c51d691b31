//! Recorded work intervals held by a task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{self, FieldError};
use crate::domain::mapping::{OwnerVisibility, Representation};
use crate::domain::ownership::{OwnedEntity, fill_id};
use crate::domain::UserId;

/// Longest recordable interval: one day.
pub const MAX_POMODORO_SECONDS: i32 = 86_400;
pub const POMODORO_COMMENT_MAX: usize = 100;

/// A finished work interval. The owner always matches the owning task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pomodoro {
    pub id: Uuid,
    pub owner: UserId,
    pub task_id: Uuid,
    pub timer_settings_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub duration_secs: i32,
    pub comment: Option<String>,
}

impl OwnedEntity for Pomodoro {
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

/// Client shape of a [`Pomodoro`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroRepresentation {
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub id: Uuid,
    #[serde(default, skip_deserializing, skip_serializing_if = "Uuid::is_nil")]
    pub app_user_id: Uuid,
    /// Parent task; filled in from the enclosing task when nested.
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub task_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_settings_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    /// Interval length in seconds.
    #[schema(example = 1500)]
    pub duration: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Representation for PomodoroRepresentation {
    type Entity = Pomodoro;

    const KIND: &'static str = "pomodoro";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_entity(entity: &Pomodoro, visibility: OwnerVisibility) -> Self {
        Self {
            id: entity.id,
            app_user_id: visibility.project(&entity.owner),
            task_id: entity.task_id,
            timer_settings_id: entity.timer_settings_id,
            started_at: entity.started_at,
            duration: entity.duration_secs,
            comment: entity.comment.clone(),
        }
    }

    fn into_entity(self, owner: &UserId) -> Pomodoro {
        Pomodoro {
            id: self.id,
            owner: owner.clone(),
            task_id: self.task_id,
            timer_settings_id: self.timer_settings_id,
            started_at: self.started_at,
            duration_secs: self.duration,
            comment: self.comment,
        }
    }

    fn validate(&self) -> Result<(), FieldError> {
        validation::range("duration", self.duration, 1, MAX_POMODORO_SECONDS)?;
        validation::optional_text("comment", self.comment.as_deref(), POMODORO_COMMENT_MAX)
    }
}
