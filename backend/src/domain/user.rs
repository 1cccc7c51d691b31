//! Caller identity.
//!
//! Every owned resource records the [`UserId`] of the account that created it.
//! The identity is supplied by the authentication collaborator (the session
//! cookie in the HTTP adapter) and is never read from client payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    Empty,
    Invalid,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::Invalid => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Stable user identifier stored as a UUID.
///
/// ## Invariants
/// - The nil UUID is rejected; it is reserved as the "owner scrubbed" marker
///   in client representations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Examples
    /// ```
    /// use pomodoro_backend::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserIdValidationError::Invalid);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| UserIdValidationError::Invalid)?;
        Self::try_from_uuid(parsed)
    }

    /// Wrap a UUID read from trusted storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    fn try_from_uuid(uuid: Uuid) -> Result<Self, UserIdValidationError> {
        if uuid.is_nil() {
            return Err(UserIdValidationError::Invalid);
        }
        Ok(Self(uuid))
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
