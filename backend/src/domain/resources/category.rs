//! Categories: the roots of each user's task tree.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::schedule::{Schedule, ScheduleRepresentation};
use super::task::{Task, TaskRepresentation};
use super::validation::{self, FieldError};
use super::{DESCRIPTION_MAX, NAME_MAX};
use crate::domain::mapping::{OwnerVisibility, Representation, own_children, represent_children};
use crate::domain::ownership::{OwnedEntity, fill_id};
use crate::domain::UserId;

/// A named grouping of tasks and schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub owner: UserId,
    pub name: String,
    pub description: Option<String>,
    pub tasks: Vec<Task>,
    pub schedules: Vec<Schedule>,
}

impl OwnedEntity for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.owner
    }

    fn assign_missing_ids(&mut self) {
        fill_id(&mut self.id);
        for task in &mut self.tasks {
            task.category_id = self.id;
            task.assign_missing_ids();
        }
        for schedule in &mut self.schedules {
            schedule.category_id = self.id;
            schedule.assign_missing_ids();
        }
    }
}

/// Client shape of a [`Category`].
///
/// `appUserId` is emitted for server data and ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRepresentation {
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub id: Uuid,
    #[serde(default, skip_deserializing, skip_serializing_if = "Uuid::is_nil")]
    pub app_user_id: Uuid,
    #[schema(example = "Work")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskRepresentation>,
    #[serde(default)]
    pub schedules: Vec<ScheduleRepresentation>,
}

impl Representation for CategoryRepresentation {
    type Entity = Category;

    const KIND: &'static str = "category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_entity(entity: &Category, visibility: OwnerVisibility) -> Self {
        Self {
            id: entity.id,
            app_user_id: visibility.project(&entity.owner),
            name: entity.name.clone(),
            description: entity.description.clone(),
            tasks: represent_children(&entity.tasks, visibility),
            schedules: represent_children(&entity.schedules, visibility),
        }
    }

    fn into_entity(self, owner: &UserId) -> Category {
        Category {
            id: self.id,
            owner: owner.clone(),
            name: self.name,
            description: self.description,
            tasks: own_children(self.tasks, owner),
            schedules: own_children(self.schedules, owner),
        }
    }

    fn validate(&self) -> Result<(), FieldError> {
        validation::text("name", &self.name, 1, NAME_MAX)?;
        validation::optional_text("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        validation::each("tasks", &self.tasks, TaskRepresentation::validate_fields)?;
        validation::each("schedules", &self.schedules, ScheduleRepresentation::validate_fields)
    }
}
