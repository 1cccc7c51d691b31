//! Result vocabulary returned by the CRUD service.

/// Classified result of one CRUD operation.
///
/// Only [`Outcome::Ok`] carries a payload and only [`Outcome::Error`] and
/// [`Outcome::Conflict`] carry a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Operation succeeded and produced a payload.
    Ok(T),
    /// Operation succeeded with nothing to return.
    NoContent,
    /// No entity with the requested id exists.
    NotFound,
    /// The entity exists but belongs to another user.
    Forbidden,
    /// Generic rejection such as a target mismatch or a storage fault.
    Error(String),
    /// Storage reported a uniqueness or concurrency violation on create.
    Conflict(String),
}

impl<T> Outcome<T> {
    /// Transform the payload of an [`Outcome::Ok`], leaving other tags intact.
    ///
    /// # Examples
    /// ```
    /// use pomodoro_backend::domain::Outcome;
    ///
    /// let doubled = Outcome::Ok(2).map(|n| n * 2);
    /// assert_eq!(doubled, Outcome::Ok(4));
    /// ```
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::NoContent => Outcome::NoContent,
            Self::NotFound => Outcome::NotFound,
            Self::Forbidden => Outcome::Forbidden,
            Self::Error(message) => Outcome::Error(message),
            Self::Conflict(message) => Outcome::Conflict(message),
        }
    }

    /// Borrow the payload when the outcome is [`Outcome::Ok`].
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the message of an [`Outcome::Error`] or [`Outcome::Conflict`].
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error(message) | Self::Conflict(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
