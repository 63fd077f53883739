use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::domain::error::AppError;

/// `Json` with the default 400 rejection remapped to a 422 carrying the
/// deserialization message, matching the field-validation error contract.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::UnprocessableEntity(rejection.body_text())),
        }
    }
}
