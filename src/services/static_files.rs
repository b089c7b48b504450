use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::core::config::Settings;

#[derive(Debug, Error)]
pub(crate) enum StaticFilesError {
    #[error("invalid relative path")]
    InvalidRelativePath,
    #[error("path escapes configured root")]
    PathOutsideRoot,
    #[error("file not found")]
    NotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn static_root(settings: &Settings) -> Result<PathBuf, StaticFilesError> {
    canonicalize_existing(resolve_config_path(&settings.storage().static_root)?)
}

/// Maps an already sanitized relative path onto a file below `root`,
/// refusing anything that would leave it through symlinks.
pub(crate) fn resolve(root: &Path, relative: &Path) -> Result<PathBuf, StaticFilesError> {
    let canonical = canonicalize_existing(root.join(relative))?;
    if !canonical.starts_with(root) {
        return Err(StaticFilesError::PathOutsideRoot);
    }
    if !canonical.is_file() {
        return Err(StaticFilesError::NotFound);
    }
    Ok(canonical)
}

/// Normalizes a request path. Parent, root and prefix components are refused,
/// as is any hidden (dot-prefixed) file or directory.
pub(crate) fn sanitize_relative_path(raw: &str) -> Result<PathBuf, StaticFilesError> {
    let normalized = raw.trim().replace('\\', "/").trim_start_matches('/').to_string();
    if normalized.is_empty() {
        return Err(StaticFilesError::InvalidRelativePath);
    }

    let path = Path::new(&normalized);
    for component in path.components() {
        match component {
            Component::Normal(part) if part.to_string_lossy().starts_with('.') => {
                return Err(StaticFilesError::InvalidRelativePath);
            }
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StaticFilesError::InvalidRelativePath);
            }
        }
    }

    Ok(path.to_path_buf())
}

pub(crate) fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") | Some("csv") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn resolve_config_path(value: &str) -> Result<PathBuf, StaticFilesError> {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn canonicalize_existing(path: PathBuf) -> Result<PathBuf, StaticFilesError> {
    if !path.exists() {
        return Err(StaticFilesError::NotFound);
    }
    Ok(std::fs::canonicalize(path)?)
}
