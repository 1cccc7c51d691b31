//! Calendar slots reserved for a category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{self, FieldError};
use super::{DESCRIPTION_MAX, NAME_MAX};
use crate::domain::mapping::{OwnerVisibility, Representation};
use crate::domain::ownership::{OwnedEntity, fill_id};
use crate::domain::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: Uuid,
    pub owner: UserId,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl OwnedEntity for Schedule {
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

/// Client shape of a [`Schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRepresentation {
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub id: Uuid,
    #[serde(default, skip_deserializing, skip_serializing_if = "Uuid::is_nil")]
    pub app_user_id: Uuid,
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub category_id: Uuid,
    #[schema(example = "Morning focus")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl ScheduleRepresentation {
    pub(crate) fn validate_fields(&self) -> Result<(), FieldError> {
        validation::text("title", &self.title, 1, NAME_MAX)?;
        validation::optional_text("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        if self.ends_at < self.starts_at {
            return Err(FieldError::new("endsAt", "endsAt must not precede startsAt"));
        }
        Ok(())
    }
}

impl Representation for ScheduleRepresentation {
    type Entity = Schedule;

    const KIND: &'static str = "schedule";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_entity(entity: &Schedule, visibility: OwnerVisibility) -> Self {
        Self {
            id: entity.id,
            app_user_id: visibility.project(&entity.owner),
            category_id: entity.category_id,
            title: entity.title.clone(),
            description: entity.description.clone(),
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
        }
    }

    fn into_entity(self, owner: &UserId) -> Schedule {
        Schedule {
            id: self.id,
            owner: owner.clone(),
            category_id: self.category_id,
            title: self.title,
            description: self.description,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        }
    }

    fn validate(&self) -> Result<(), FieldError> {
        if self.category_id.is_nil() {
            return Err(FieldError::new("categoryId", "categoryId is required"));
        }
        self.validate_fields()
    }
}
