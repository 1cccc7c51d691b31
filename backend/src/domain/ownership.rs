//! Ownership predicate and the entity role shared by every owned kind.

use uuid::Uuid;

use super::UserId;

/// Report whether `caller` owns an entity recorded against `owner`.
///
/// # Examples
/// ```
/// use pomodoro_backend::domain::{belongs_to, UserId};
///
/// let alice = UserId::random();
/// assert!(belongs_to(&alice, &alice));
/// assert!(!belongs_to(&alice, &UserId::random()));
/// ```
#[must_use]
pub fn belongs_to(owner: &UserId, caller: &UserId) -> bool {
    owner == caller
}

/// Persisted aggregate owned by exactly one user.
///
/// Implementors hold their owned children inline so a repository can insert
/// or remove the whole graph in one unit of work.
pub trait OwnedEntity: Clone + Send + Sync + 'static {
    /// Stable identifier; nil until the repository assigns one.
    fn id(&self) -> Uuid;

    /// Owner recorded on the root.
    fn owner(&self) -> &UserId;

    /// Fill nil ids throughout the graph and point children at their parent.
    fn assign_missing_ids(&mut self);
}

/// Replace a nil identifier with a fresh random one.
pub(crate) fn fill_id(id: &mut Uuid) {
    if id.is_nil() {
        *id = Uuid::new_v4();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_user_owns() {
        let user = UserId::random();
        assert!(belongs_to(&user, &user.clone()));
    }

    #[rstest]
    fn different_user_does_not_own() {
        assert!(!belongs_to(&UserId::random(), &UserId::random()));
    }

    #[rstest]
    fn fill_id_keeps_existing_ids() {
        let existing = Uuid::new_v4();
        let mut id = existing;
        fill_id(&mut id);
        assert_eq!(id, existing);

        let mut nil = Uuid::nil();
        fill_id(&mut nil);
        assert!(!nil.is_nil());
    }
}
