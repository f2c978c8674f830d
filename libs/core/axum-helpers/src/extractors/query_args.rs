//! Query string extractor with standard error responses.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Like `axum::extract::Query`, but a query string that does not
/// deserialize (unknown enum value, wrong type) is rejected as
/// `INVALID_ARGUMENT` with the standard JSON body.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::QueryArgs;
///
/// async fn list_tasks(QueryArgs(filter): QueryArgs<TaskFilter>) { /* ... */ }
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryArgs<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryArgs<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(QueryArgs(value))
    }
}
