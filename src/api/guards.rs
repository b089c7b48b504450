use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;

use crate::api::errors::ApiError;
use crate::core::state::AppState;

/// Name of the user the request is made for, taken from the configured
/// user header. Absent when the header is missing or blank.
pub(crate) struct CurrentUsername(pub(crate) Option<String>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUsername {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let header_name = app_state.settings().dashboard().user_header.as_str();
        let username = parts
            .headers
            .get(header_name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(CurrentUsername(username))
    }
}
