//! Schema validation of JSON payloads returned by the ExpenseLM API.
//!
//! Validation runs in two passes. The payload is first deserialized with
//! path tracking, so shape errors (wrong type, unknown enum tag, missing
//! required field) name the offending field. The typed value is then
//! checked against the invariants serde cannot express.

use crate::types::*;
use serde::de::DeserializeOwned;

/// A payload that does not match the declared output shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed at `{path}`: {message}")]
pub struct ValidationError {
    /// Path of the first offending field, `.` for the document root.
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() { ".".to_string() } else { path },
            message: message.into(),
        }
    }
}

/// Invariants checked after a record has been deserialized.
pub trait Validate {
    /// Check the value located at `path` within the payload.
    fn validate_at(&self, path: &str) -> Result<(), ValidationError>;

    fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at("")
    }
}

fn field_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

/// Deserialize `bytes` into `T` and check its invariants.
///
/// Sequences stop at the first failing element; no partial result is
/// returned. Fields absent from the payload take their declared default,
/// an explicit `null` is only accepted for optional fields.
pub fn validate_json<T>(bytes: &[u8]) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let path = err.path().to_string();
        ValidationError::new(path, err.into_inner().to_string())
    })?;
    de.end()
        .map_err(|err| ValidationError::new(".", err.to_string()))?;

    value.validate()?;
    Ok(value)
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_at(&self, path: &str) -> Result<(), ValidationError> {
        for (index, item) in self.iter().enumerate() {
            item.validate_at(&format!("{}[{}]", path, index))?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_at(&self, path: &str) -> Result<(), ValidationError> {
        match self {
            Some(value) => value.validate_at(path),
            None => Ok(()),
        }
    }
}

impl Validate for ExpenseImage {
    fn validate_at(&self, path: &str) -> Result<(), ValidationError> {
        if self.image_file_name.is_empty() {
            return Err(ValidationError::new(
                field_path(path, "image_file_name"),
                "image file name must not be empty",
            ));
        }
        Ok(())
    }
}

impl Validate for ExpenseItem {
    fn validate_at(&self, _path: &str) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for Expense {
    fn validate_at(&self, path: &str) -> Result<(), ValidationError> {
        self.items.validate_at(&field_path(path, "items"))
    }
}

impl Validate for ExpenseImageData {
    fn validate_at(&self, path: &str) -> Result<(), ValidationError> {
        self.image.validate_at(&field_path(path, "image"))?;
        self.expense.validate_at(&field_path(path, "expense"))
    }
}

impl Validate for ExpenseRecord {
    fn validate_at(&self, path: &str) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::new(
                field_path(path, "id"),
                "record id must not be empty",
            ));
        }
        self.image.validate_at(&field_path(path, "image"))?;
        self.expense.validate_at(&field_path(path, "expense"))
    }
}

// Stat rows carry no invariants beyond their shape.
impl Validate for MonthCurAmtStatItem {
    fn validate_at(&self, _path: &str) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for CategoryCurAmtStatItem {
    fn validate_at(&self, _path: &str) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for SubscriptionCurAmtStatItem {
    fn validate_at(&self, _path: &str) -> Result<(), ValidationError> {
        Ok(())
    }
}
