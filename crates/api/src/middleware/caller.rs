//! Caller identity extractor for Axum handlers.
//!
//! There is no authentication: a caller is whoever it claims to be. The
//! claim is read in one place so that a verified session can replace it
//! without touching any handler or repository.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use chronicle_core::error::CoreError;

use crate::error::AppError;

/// Request header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of.
///
/// Read from the `x-user-id` header, falling back to the `userId` query
/// parameter. Blank values count as missing.
///
/// ```ignore
/// async fn my_handler(caller: Caller) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %caller.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
struct CallerQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(non_blank);

        let from_query = || {
            Query::<CallerQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(q)| q.user_id)
                .and_then(|id| non_blank(&id))
        };

        from_header
            .or_else(from_query)
            .map(|user_id| Caller { user_id })
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing caller identity. Send the {USER_ID_HEADER} header or a userId query parameter"
                )))
            })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
