use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use common::{Schema, Validation, validate_form_data};
use serde_json::Value;

use crate::error::AppError;

/// A `Json<Value>` wrapper that runs the body through schema `T`.
///
/// Malformed JSON and schema failures both become `VALIDATION_ERROR`
/// responses; the latter carry one `"field: message"` entry per problem.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: Schema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::Validation(e.body_text()))?;

        match validate_form_data::<T>(&value) {
            Validation::Valid(parsed) => Ok(AppJson(parsed)),
            Validation::Invalid(errors) => Err(AppError::InvalidFields(errors)),
        }
    }
}

/// Untyped JSON body for endpoints that validate on their own terms.
pub struct RawJson(pub Value);

impl<S> FromRequest<S> for RawJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::Validation(e.body_text()))?;
        Ok(RawJson(value))
    }
}
