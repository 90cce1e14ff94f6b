use chrono::{DateTime, Utc};
use common::Validation;
use common::text::{capitalize_words, format_date, slugify, truncate_text};
use common::validation::schemas::BlogCreation;
use serde::Serialize;

use crate::store::HealthReport;

/// Output of the text helpers on fixed or caller-supplied input.
#[derive(Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UtilitySample {
    pub format_date: String,
    pub truncate_text: String,
    pub slugify: String,
    pub capitalize_words: String,
}

impl UtilitySample {
    pub fn new(
        now: DateTime<Utc>,
        long_text: &str,
        truncate_at: usize,
        title: &str,
        words: &str,
    ) -> Self {
        Self {
            format_date: format_date(now),
            truncate_text: truncate_text(long_text, truncate_at),
            slugify: slugify(title),
            capitalize_words: capitalize_words(words),
        }
    }
}

/// Self-check of the store, text helpers and validation.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DiagnosticsReport {
    pub timestamp: DateTime<Utc>,
    pub database: HealthReport,
    pub utilities: UtilitySample,
    /// Validation outcome of the built-in sample blog.
    #[schema(value_type = Object)]
    pub validation: Validation<BlogCreation>,
}

/// Result of validating a caller-supplied blog.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DiagnosticsEcho {
    pub validation: BlogCreation,
    pub utilities: UtilitySample,
}

/// Body of a failed diagnostics validation.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DiagnosticsFailure {
    /// Always `false`.
    pub success: bool,
    /// `"field: message"` strings.
    pub validation: Vec<String>,
    pub message: String,
}
