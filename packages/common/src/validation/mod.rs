//! Boundary validation for request payloads.
//!
//! A [`Schema`] reads its fields out of an untyped JSON object through
//! [`Fields`], which records a [`FieldError`] for every check that fails.
//! All fields are inspected before the typed value is assembled so that a
//! caller sees every problem with a payload at once.

mod fields;
pub mod schemas;

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

pub use fields::{Fields, Text};

/// A failed check on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dot-joined path of the offending field (empty for the root object).
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating a payload against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    /// `"field: message"` strings, one per failed check.
    Invalid(Vec<String>),
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

impl<T: Serialize> Serialize for Validation<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Validation", 2)?;
        match self {
            Self::Valid(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Invalid(errors) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

/// A typed payload that can be read out of a JSON object.
pub trait Schema: Sized {
    /// Read every field, recording failures in `fields`.
    ///
    /// Returns `None` when any field failed. Implementations must inspect all
    /// fields before bailing out.
    fn parse(fields: &mut Fields<'_>) -> Option<Self>;
}

/// Validate `data` against schema `T`.
pub fn validate_form_data<T: Schema>(data: &Value) -> Validation<T> {
    let mut errors = Vec::new();
    let parsed = match data.as_object() {
        Some(object) => {
            let mut fields = Fields::new(String::new(), object, &mut errors);
            T::parse(&mut fields)
        }
        None => {
            errors.push(FieldError::new(
                "",
                format!("Expected object, received {}", json_type(data)),
            ));
            None
        }
    };

    match parsed {
        Some(value) if errors.is_empty() => Validation::Valid(value),
        _ if errors.is_empty() => Validation::Invalid(vec!["Validation failed".into()]),
        _ => Validation::Invalid(errors.iter().map(ToString::to_string).collect()),
    }
}

/// Name of a JSON value's type as reported in error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
