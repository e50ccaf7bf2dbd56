use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Deserialization failures (missing fields, malformed JSON) and rule
/// violations both reject with a 400-class `AppError`, so handlers always
/// receive a structurally valid, rule-checked payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;

        if let Err(errors) = value.validate() {
            let (field, reason) = first_violation(&errors);
            return Err(AppError::Validation { field, reason });
        }

        Ok(ValidatedJson(value))
    }
}

/// Picks the first reported violation as (field, message).
fn first_violation(errors: &validator::ValidationErrors) -> (String, String) {
    errors
        .field_errors()
        .iter()
        .next()
        .map(|(field, violations)| {
            let message = violations
                .first()
                .and_then(|v| v.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "invalid value".to_string());
            (field.to_string(), message)
        })
        .unwrap_or_else(|| ("body".to_string(), "invalid request body".to_string()))
}
