//! JSON body extractor that runs `validator` rules before the handler.

use axum::extract::{FromRequest, Request};
use axum::Json;
use forum_core::error::CoreError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Like [`Json`], but rejects malformed bodies and failed field rules with
/// a 400 `VALIDATION_ERROR` in the standard error envelope.
///
/// ```ignore
/// async fn create(ValidJson(input): ValidJson<CreateUser>) -> AppResult<Json<User>> { .. }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))?;

        value
            .validate()
            .map_err(|errors| AppError::Core(CoreError::Validation(errors.to_string())))?;

        Ok(ValidJson(value))
    }
}
