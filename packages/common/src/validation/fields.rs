use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::{Map, Value};

use super::{FieldError, Schema, json_type};
use crate::content::Choice;
use crate::sanitize::validate_url;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

#[derive(Clone, Copy, Debug)]
enum Format {
    Email(&'static str),
    Url(&'static str),
}

/// Constraints on a string field. Bounds are inclusive and count characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Text {
    min: Option<(usize, &'static str)>,
    max: Option<(usize, &'static str)>,
    format: Option<Format>,
}

impl Text {
    pub const fn any() -> Self {
        Self {
            min: None,
            max: None,
            format: None,
        }
    }

    pub const fn min(mut self, len: usize, message: &'static str) -> Self {
        self.min = Some((len, message));
        self
    }

    pub const fn max(mut self, len: usize, message: &'static str) -> Self {
        self.max = Some((len, message));
        self
    }

    pub const fn email(mut self, message: &'static str) -> Self {
        self.format = Some(Format::Email(message));
        self
    }

    pub const fn url(mut self, message: &'static str) -> Self {
        self.format = Some(Format::Url(message));
        self
    }

    fn violations(&self, value: &str) -> Vec<&'static str> {
        let len = value.chars().count();
        let mut out = Vec::new();
        if let Some((min, message)) = self.min
            && len < min
        {
            out.push(message);
        }
        if let Some((max, message)) = self.max
            && len > max
        {
            out.push(message);
        }
        match self.format {
            Some(Format::Email(message)) if !EMAIL.is_match(value) => out.push(message),
            Some(Format::Url(message)) if !validate_url(value) => out.push(message),
            _ => {}
        }
        out
    }
}

/// Reader over one JSON object that records a [`FieldError`] per failed check.
///
/// Required readers return `None` on failure. Optional readers return
/// `Some(None)` when the key is absent, `Some(Some(v))` when it is valid and
/// `None` on failure, so a schema can assemble itself with `?`.
pub struct Fields<'a> {
    prefix: String,
    object: &'a Map<String, Value>,
    errors: &'a mut Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub fn new(
        prefix: String,
        object: &'a Map<String, Value>,
        errors: &'a mut Vec<FieldError>,
    ) -> Self {
        Self {
            prefix,
            object,
            errors,
        }
    }

    /// Full dotted path of `key` within the validated document.
    pub fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    /// Record a failure against `key`.
    pub fn fail(&mut self, key: &str, message: impl Into<String>) {
        let path = self.path(key);
        self.errors.push(FieldError::new(path, message));
    }

    /// The raw value of `key`, for checks no typed reader covers.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key)
    }

    fn require(&mut self, key: &str) -> Option<&'a Value> {
        let value = self.object.get(key);
        if value.is_none() {
            self.fail(key, "Required");
        }
        value
    }

    fn mismatch(&mut self, key: &str, expected: &str, value: &Value) {
        self.fail(
            key,
            format!("Expected {expected}, received {}", json_type(value)),
        );
    }

    fn check_text(&mut self, key: &str, value: &'a Value, rules: Text) -> Option<String> {
        let Some(s) = value.as_str() else {
            self.mismatch(key, "string", value);
            return None;
        };
        let violations = rules.violations(s);
        if violations.is_empty() {
            return Some(s.to_string());
        }
        for message in violations {
            self.fail(key, message);
        }
        None
    }

    pub fn text(&mut self, key: &str, rules: Text) -> Option<String> {
        let value = self.require(key)?;
        self.check_text(key, value, rules)
    }

    pub fn optional_text(&mut self, key: &str, rules: Text) -> Option<Option<String>> {
        match self.object.get(key) {
            None => Some(None),
            Some(value) => self.check_text(key, value, rules).map(Some),
        }
    }

    pub fn text_or(&mut self, key: &str, rules: Text, default: &str) -> Option<String> {
        self.optional_text(key, rules)
            .map(|v| v.unwrap_or_else(|| default.to_string()))
    }

    fn check_choice<C: Choice>(&mut self, key: &str, value: &Value) -> Option<C> {
        let Some(s) = value.as_str() else {
            self.mismatch(key, &C::expected(), value);
            return None;
        };
        let parsed = C::from_choice(s);
        if parsed.is_none() {
            self.fail(
                key,
                format!(
                    "Invalid enum value. Expected {}, received '{s}'",
                    C::expected()
                ),
            );
        }
        parsed
    }

    pub fn choice<C: Choice>(&mut self, key: &str) -> Option<C> {
        let value = self.require(key)?;
        self.check_choice(key, value)
    }

    pub fn optional_choice<C: Choice>(&mut self, key: &str) -> Option<Option<C>> {
        match self.object.get(key) {
            None => Some(None),
            Some(value) => self.check_choice(key, value).map(Some),
        }
    }

    pub fn choice_or<C: Choice>(&mut self, key: &str, default: C) -> Option<C> {
        self.optional_choice(key).map(|v| v.unwrap_or(default))
    }

    pub fn flag_or(&mut self, key: &str, default: bool) -> Option<bool> {
        match self.object.get(key) {
            None => Some(default),
            Some(Value::Bool(b)) => Some(*b),
            Some(value) => {
                self.mismatch(key, "boolean", value);
                None
            }
        }
    }

    /// An integer in `min..=max`, or `default` when absent.
    pub fn integer_or(
        &mut self,
        key: &str,
        min: i64,
        max: Option<i64>,
        default: i64,
    ) -> Option<i64> {
        let Some(value) = self.object.get(key) else {
            return Some(default);
        };
        let Some(n) = value.as_i64() else {
            if value.is_number() {
                self.fail(key, "Expected integer, received float");
            } else {
                self.mismatch(key, "number", value);
            }
            return None;
        };
        if n < min {
            self.fail(key, format!("Number must be greater than or equal to {min}"));
            return None;
        }
        if let Some(max) = max
            && n > max
        {
            self.fail(key, format!("Number must be less than or equal to {max}"));
            return None;
        }
        Some(n)
    }

    pub fn optional_string_list(&mut self, key: &str) -> Option<Option<Vec<String>>> {
        let Some(value) = self.object.get(key) else {
            return Some(None);
        };
        let Some(items) = value.as_array() else {
            self.mismatch(key, "array", value);
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => {
                    self.mismatch(&format!("{key}.{i}"), "string", item);
                    ok = false;
                }
            }
        }
        ok.then_some(Some(out))
    }

    /// An RFC 3339 timestamp.
    pub fn optional_datetime(&mut self, key: &str) -> Option<Option<DateTime<Utc>>> {
        let Some(value) = self.object.get(key) else {
            return Some(None);
        };
        let Some(s) = value.as_str() else {
            self.mismatch(key, "date", value);
            return None;
        };
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Some(Some(dt.with_timezone(&Utc))),
            Err(_) => {
                self.fail(key, "Invalid date");
                None
            }
        }
    }

    /// An arbitrary JSON object (`Record<string, any>`).
    pub fn optional_map(&mut self, key: &str) -> Option<Option<Map<String, Value>>> {
        match self.object.get(key) {
            None => Some(None),
            Some(Value::Object(map)) => Some(Some(map.clone())),
            Some(value) => {
                self.mismatch(key, "object", value);
                None
            }
        }
    }

    fn check_nested<T: Schema>(&mut self, key: &str, value: &'a Value) -> Option<T> {
        let Some(object) = value.as_object() else {
            self.mismatch(key, "object", value);
            return None;
        };
        let prefix = self.path(key);
        let mut nested = Fields::new(prefix, object, &mut *self.errors);
        T::parse(&mut nested)
    }

    pub fn nested<T: Schema>(&mut self, key: &str) -> Option<T> {
        let value = self.require(key)?;
        self.check_nested(key, value)
    }

    pub fn optional_nested<T: Schema>(&mut self, key: &str) -> Option<Option<T>> {
        match self.object.get(key) {
            None => Some(None),
            Some(value) => self.check_nested(key, value).map(Some),
        }
    }
}
