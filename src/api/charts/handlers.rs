use std::path::Path;

use axum::extract::{Multipart, Path as UrlPath, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUsername;
use crate::api::validation::{is_flag_set, parse_optional_int};
use crate::core::config::DashboardSettings;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::repositories;
use crate::repositories::dashboards::ViewFilter;
use crate::schemas::dashboard::{DashboardListResponse, DashboardViewResponse};
use crate::services::dimensions::{self, Dimensions};
use crate::services::pagination::{PageRequest, Paginator};
use crate::services::static_assets;
use crate::services::static_files::{self, StaticFilesError};
use crate::services::uploads::{self, UploadError};

use super::queries::ListDashboardsQuery;

pub(super) async fn dashboard(
    State(state): State<AppState>,
    CurrentUsername(username): CurrentUsername,
    Query(params): Query<ListDashboardsQuery>,
) -> Result<Json<DashboardListResponse>, ApiError> {
    let request = PageRequest {
        page: parse_optional_int("page", params.page.as_deref())?,
        per_page: parse_optional_int("per_page", params.per_page.as_deref())?,
    };

    let settings = state.settings().dashboard();
    let filter = view_filter(settings, username.as_deref());

    let pagination = Paginator::from_settings(settings)
        .paginate_with_count(request, None, || {
            repositories::dashboards::count(state.db(), &filter)
        })
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count dashboards"))?;

    let (views, paginator) = if pagination.count > 0 {
        let rows = repositories::dashboards::read(
            state.db(),
            &filter,
            pagination.limit,
            pagination.skip,
        )
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list dashboards"))?;
        let views: Vec<DashboardViewResponse> = rows.into_iter().map(Into::into).collect();
        (views, Some(pagination))
    } else {
        (Vec::new(), None)
    };

    tracing::debug!(
        total = paginator.as_ref().map(|p| p.count).unwrap_or(0),
        listed = views.len(),
        filtered = settings.filter_users,
        "Listing dashboards"
    );
    metrics::record_listing(views.len());

    let total_modules = views.iter().map(|view| view.modules.len()).sum();
    let static_config = settings.static_overrides.clone();
    let charts_config =
        static_assets::effective_config(state.charts_config(), static_config.as_ref());

    Ok(Json(DashboardListResponse {
        views,
        view: None,
        paginator,
        total_modules,
        static_config,
        charts_config,
        page_title: "dashboards",
        demo_mode: is_flag_set(params.jsondash_demo_mode.as_deref()),
        global_dashuser: settings.global_user.clone(),
        global_dashboards: settings.global_dashboards,
        username: if settings.filter_users { username } else { None },
        filter_dashboards: settings.filter_users,
    }))
}

/// Views visible for a listing: everything, or only those owned by the
/// current user (plus the global user's when global dashboards are on).
pub(super) fn view_filter(settings: &DashboardSettings, username: Option<&str>) -> ViewFilter {
    if !settings.filter_users {
        return ViewFilter::All;
    }

    let mut creators: Vec<String> = username.map(str::to_string).into_iter().collect();
    if settings.global_dashboards && !creators.contains(&settings.global_user) {
        creators.push(settings.global_user.clone());
    }
    ViewFilter::CreatedBy(creators)
}

pub(super) async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String, ApiError> {
    let max_bytes = state.settings().storage().max_upload_bytes();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Invalid multipart data".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("File must have a filename".to_string()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|_| ApiError::BadRequest("Failed to read file".to_string()))?
        {
            let next_size = bytes.len() as u64 + chunk.len() as u64;
            if next_size > max_bytes {
                metrics::record_upload("too_large");
                return Err(ApiError::BadRequest(format!(
                    "File size exceeds {}MB limit",
                    state.settings().storage().max_upload_size_mb
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        upload = Some((filename, bytes));
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;

    let upload_dir = Path::new(&state.settings().storage().upload_dir);
    let (stored, path) = uploads::store(upload_dir, &filename, &bytes).await.map_err(|err| {
        metrics::record_upload("rejected");
        match err {
            UploadError::EmptyFilename => {
                ApiError::BadRequest(format!("Filename '{filename}' is not allowed"))
            }
            UploadError::Io(err) => ApiError::internal(err, "Failed to store upload"),
        }
    })?;

    tracing::info!(
        filename = %stored,
        path = %path.display(),
        size = bytes.len(),
        "File uploaded"
    );
    metrics::record_upload("stored");
    Ok(stored)
}

pub(super) async fn module_dimensions(
    Json(config): Json<serde_json::Value>,
) -> Result<Json<Dimensions>, ApiError> {
    dimensions::dimensions(&config)
        .map(Json)
        .map_err(|err| ApiError::BadRequest(err.to_string()))
}

pub(super) async fn blueprint_static(
    UrlPath(filename): UrlPath<String>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let relative = static_files::sanitize_relative_path(&filename).map_err(map_static_error)?;
    let root = static_files::static_root(state.settings()).map_err(map_static_error)?;
    let file_path = static_files::resolve(&root, &relative).map_err(map_static_error)?;
    let bytes = tokio::fs::read(&file_path)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to read static file"))?;
    let mime = static_files::guess_mime(&file_path);

    let mut response = (StatusCode::OK, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
    Ok(response)
}

fn map_static_error(error: StaticFilesError) -> ApiError {
    match error {
        StaticFilesError::InvalidRelativePath | StaticFilesError::PathOutsideRoot => {
            metrics::record_static_denied();
            ApiError::Forbidden("Path is not allowed")
        }
        StaticFilesError::NotFound => ApiError::NotFound("File not found".to_string()),
        StaticFilesError::Io(err) => ApiError::internal(err, "File access failed"),
    }
}
