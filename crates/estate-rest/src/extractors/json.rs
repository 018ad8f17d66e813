//! JSON body extractor with the API's error shape.
//!
//! Axum's own `Json` rejects with a plain-text body. `ApiJson` turns every
//! rejection into a `VALIDATION_ERROR` so clients always get `{code, message}`.
//! Field rules are checked by the services, not here.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use estate_core::EstateError;
use serde::de::DeserializeOwned;

/// Deserialized JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T> std::ops::Deref for ApiJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    AppError(EstateError::validation(format!(
        "Invalid request body: {}",
        rejection.body_text()
    )))
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| rejection_to_error(&rejection))?;

        Ok(Self(value))
    }
}
