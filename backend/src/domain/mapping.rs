//! Bidirectional mapping between owned entities and client representations.
//!
//! Each kind implements [`Representation`] by hand and delegates nested
//! collections to [`represent_children`] and [`own_children`], so owner
//! injection happens in exactly one place.

use uuid::Uuid;

use super::resources::FieldError;
use super::{OwnedEntity, UserId};

/// Whether a representation exposes the entity owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerVisibility {
    /// Copy the stored owner; used for server-originated data.
    Include,
    /// Replace the owner with the nil sentinel.
    ///
    /// For copies that leave the owner's session, such as data exported or
    /// logged outside a request. The CRUD routes always use `Include`.
    Scrub,
}

impl OwnerVisibility {
    /// Project an owner into its client-facing UUID.
    ///
    /// # Examples
    /// ```
    /// use pomodoro_backend::domain::{OwnerVisibility, UserId};
    ///
    /// let owner = UserId::random();
    /// assert_eq!(OwnerVisibility::Include.project(&owner), *owner.as_uuid());
    /// assert!(OwnerVisibility::Scrub.project(&owner).is_nil());
    /// ```
    #[must_use]
    pub fn project(self, owner: &UserId) -> Uuid {
        match self {
            Self::Include => *owner.as_uuid(),
            Self::Scrub => Uuid::nil(),
        }
    }
}

/// Client-facing shape of an [`OwnedEntity`].
pub trait Representation: Sized + Send + Sync + 'static {
    /// Entity this representation maps to.
    type Entity: OwnedEntity;

    /// Lowercase resource name used in routes and log fields.
    const KIND: &'static str;

    /// Identifier carried by the representation; nil when not yet assigned.
    fn id(&self) -> Uuid;

    /// Copy scalars and recursively map owned children.
    fn from_entity(entity: &Self::Entity, visibility: OwnerVisibility) -> Self;

    /// Build an entity owned by `owner`, ignoring any owner on `self`.
    fn into_entity(self, owner: &UserId) -> Self::Entity;

    /// Check field constraints before the representation reaches storage.
    fn validate(&self) -> Result<(), FieldError>;
}

/// Map stored children into freshly built representations.
pub(crate) fn represent_children<R>(children: &[R::Entity], visibility: OwnerVisibility) -> Vec<R>
where
    R: Representation,
{
    children
        .iter()
        .map(|child| R::from_entity(child, visibility))
        .collect()
}

/// Stamp `owner` on every submitted child while converting to entities.
pub(crate) fn own_children<R>(children: Vec<R>, owner: &UserId) -> Vec<R::Entity>
where
    R: Representation,
{
    children
        .into_iter()
        .map(|child| child.into_entity(owner))
        .collect()
}
