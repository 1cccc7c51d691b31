//! Field constraint checks shared by every representation.

use std::fmt;

use serde_json::{Value, json};

/// A single field constraint violation.
///
/// `field` is the camelCase JSON path of the offending value, for example
/// `tasks[1].name` when the failure sits inside a nested collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// JSON path of the rejected field.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Prefix the path with the collection entry that contained it.
    #[must_use]
    pub fn within(self, collection: &str, index: usize) -> Self {
        Self {
            field: format!("{collection}[{index}].{}", self.field),
            message: self.message,
        }
    }

    /// Structured details for the error envelope.
    #[must_use]
    pub fn details(&self) -> Value {
        json!({ "field": self.field, "code": "invalid_field" })
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Require `value` to hold between `min` and `max` characters once trimmed.
pub(crate) fn text(field: &str, value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    let length = value.trim().chars().count();
    if length < min {
        return Err(FieldError::new(field, format!("{field} is required")));
    }
    if length > max {
        return Err(FieldError::new(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

pub(crate) fn optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), FieldError> {
    match value {
        Some(inner) => text(field, inner, 0, max),
        None => Ok(()),
    }
}

/// Require `value` to fall inside `min..=max`.
pub(crate) fn range(field: &str, value: i32, min: i32, max: i32) -> Result<(), FieldError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::new(
            field,
            format!("{field} must be between {min} and {max}"),
        ))
    }
}

/// Validate each entry of a nested collection, reporting the first failure.
pub(crate) fn each<T>(
    collection: &str,
    items: &[T],
    check: impl Fn(&T) -> Result<(), FieldError>,
) -> Result<(), FieldError> {
    items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| check(item).map_err(|err| err.within(collection, index)))
}
