mod handlers;
mod queries;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::core::config::Settings;
use crate::core::state::AppState;

/// Multipart framing allowance on top of the configured file size limit.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

pub(crate) fn router(settings: &Settings) -> Router<AppState> {
    let upload_limit = settings.storage().max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/charts", get(handlers::dashboard))
        .route(
            "/charts/uploader",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(upload_limit as usize)),
        )
        .route("/charts/dimensions", post(handlers::module_dimensions))
        .route("/charts/*filename", get(handlers::blueprint_static))
}
