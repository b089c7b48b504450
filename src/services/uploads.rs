use std::path::{Path, PathBuf};

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Error)]
pub(crate) enum UploadError {
    #[error("filename is empty after sanitizing")]
    EmptyFilename,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reduces a client supplied filename to something safe to store on disk.
///
/// The name is NFKD-decomposed first so accented letters keep their base
/// letter; whatever is still non-ASCII is dropped. Path separators and whitespace runs turn
/// into `_`, anything outside `[A-Za-z0-9_.-]` is removed and leading or
/// trailing dots and underscores are stripped. Returns `None` when nothing is
/// left.
pub(crate) fn secure_filename(name: &str) -> Option<String> {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = filtered.trim_matches(|c: char| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Writes an upload into `dir` under its sanitized name, replacing any
/// previous file with the same name.
pub(crate) async fn store(
    dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<(String, PathBuf), UploadError> {
    let filename = secure_filename(original_name).ok_or(UploadError::EmptyFilename)?;
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(&filename);
    tokio::fs::write(&path, bytes).await?;
    Ok((filename, path))
}
