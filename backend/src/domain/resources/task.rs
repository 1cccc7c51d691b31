//! Tasks filed under a category, each holding its recorded pomodoros.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::pomodoro::{Pomodoro, PomodoroRepresentation};
use super::validation::{self, FieldError};
use super::{DESCRIPTION_MAX, NAME_MAX};
use crate::domain::mapping::{OwnerVisibility, Representation, own_children, represent_children};
use crate::domain::ownership::{OwnedEntity, fill_id};
use crate::domain::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub owner: UserId,
    pub category_id: Uuid,
    pub timer_settings_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    /// Planned effort in seconds.
    pub allocated_time_secs: i32,
    pub is_done: bool,
    pub pomodoros: Vec<Pomodoro>,
}

impl OwnedEntity for Task {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.owner
    }

    fn assign_missing_ids(&mut self) {
        fill_id(&mut self.id);
        for pomodoro in &mut self.pomodoros {
            pomodoro.assign_missing_ids();
            pomodoro.task_id = self.id;
        }
    }
}

/// Client shape of a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRepresentation {
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub id: Uuid,
    #[serde(default, skip_deserializing, skip_serializing_if = "Uuid::is_nil")]
    pub app_user_id: Uuid,
    /// Required for top-level tasks; filled in from the category when nested.
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_settings_id: Option<Uuid>,
    #[schema(example = "Write report")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Planned effort in seconds.
    #[serde(default)]
    pub allocated_time: i32,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub pomodoros: Vec<PomodoroRepresentation>,
}

impl TaskRepresentation {
    /// Checks that hold whether the task is submitted alone or inside a
    /// category.
    pub(crate) fn validate_fields(&self) -> Result<(), FieldError> {
        validation::text("name", &self.name, 1, NAME_MAX)?;
        validation::optional_text("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        validation::range("allocatedTime", self.allocated_time, 0, i32::MAX)?;
        validation::each("pomodoros", &self.pomodoros, PomodoroRepresentation::validate)
    }
}

impl Representation for TaskRepresentation {
    type Entity = Task;

    const KIND: &'static str = "task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_entity(entity: &Task, visibility: OwnerVisibility) -> Self {
        Self {
            id: entity.id,
            app_user_id: visibility.project(&entity.owner),
            category_id: entity.category_id,
            timer_settings_id: entity.timer_settings_id,
            name: entity.name.clone(),
            description: entity.description.clone(),
            allocated_time: entity.allocated_time_secs,
            is_done: entity.is_done,
            pomodoros: represent_children(&entity.pomodoros, visibility),
        }
    }

    fn into_entity(self, owner: &UserId) -> Task {
        Task {
            id: self.id,
            owner: owner.clone(),
            category_id: self.category_id,
            timer_settings_id: self.timer_settings_id,
            name: self.name,
            description: self.description,
            allocated_time_secs: self.allocated_time,
            is_done: self.is_done,
            pomodoros: own_children(self.pomodoros, owner),
        }
    }

    fn validate(&self) -> Result<(), FieldError> {
        if self.category_id.is_nil() {
            return Err(FieldError::new("categoryId", "categoryId is required"));
        }
        self.validate_fields()
    }
}
