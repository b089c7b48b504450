use crate::api::errors::ApiError;

/// Parses an optional integer query value. Blank values count as absent.
pub(crate) fn parse_optional_int(field: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("{field} must be an integer, got '{value}'")))
}

/// Query flags are on when present with any non-empty value, whitespace
/// included.
pub(crate) fn is_flag_set(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| !value.is_empty())
}
