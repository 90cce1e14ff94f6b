use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INVALID_OUTLINE: &str = "Outline must be a list of strings";

/// Ordered section headings of a blog post.
///
/// Persisted as a JSON array of strings. Clients may also send the array
/// JSON-encoded inside a string, which older forms do.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct Outline(pub Vec<String>);

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse an outline from request input.
    pub fn from_input(value: &Value) -> Result<Self, &'static str> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self)
                .ok_or(INVALID_OUTLINE),
            Value::String(encoded) => serde_json::from_str::<Vec<String>>(encoded)
                .map(Self)
                .map_err(|_| INVALID_OUTLINE),
            _ => Err(INVALID_OUTLINE),
        }
    }

    /// Rebuild an outline from its stored form, skipping anything that is not a string.
    pub fn from_stored(value: &Value) -> Self {
        let items = value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Self(items)
    }

    pub fn to_stored(&self) -> Value {
        Value::from(self.0.clone())
    }
}

impl From<Vec<String>> for Outline {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}
