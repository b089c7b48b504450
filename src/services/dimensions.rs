use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const YOUTUBE_PADDING_WIDTH: i64 = 20;
const YOUTUBE_PADDING_HEIGHT: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Dimensions {
    pub(crate) width: i64,
    pub(crate) height: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum DimensionsError {
    #[error("module config must define both width and height")]
    InvalidConfig,
    #[error("invalid {0} value")]
    InvalidValue(&'static str),
    #[error("youtube embed code is missing {0}")]
    InvalidEmbed(&'static str),
}

/// Resolves the rendered size of a chart module.
///
/// YouTube modules take their size from the embed code in `dataSource`
/// (plus some padding for the widget chrome) instead of the configured one.
pub(crate) fn dimensions(config: &Value) -> Result<Dimensions, DimensionsError> {
    let (Some(width), Some(height)) = (config.get("width"), config.get("height")) else {
        return Err(DimensionsError::InvalidConfig);
    };

    if config.get("type").and_then(Value::as_str) == Some("youtube") {
        let embed = config.get("dataSource").and_then(Value::as_str).unwrap_or_default();
        return youtube_dimensions(embed);
    }

    Ok(Dimensions { width: as_pixels(width, "width")?, height: as_pixels(height, "height")? })
}

fn youtube_dimensions(embed: &str) -> Result<Dimensions, DimensionsError> {
    // <iframe width="560" height="315" src="..." ...>
    let tokens: Vec<&str> = embed.split(' ').collect();
    let width = embed_attribute(tokens.get(1).copied(), "width")?;
    let height = embed_attribute(tokens.get(2).copied(), "height")?;

    Ok(Dimensions {
        width: width + YOUTUBE_PADDING_WIDTH,
        height: height + YOUTUBE_PADDING_HEIGHT,
    })
}

fn embed_attribute(token: Option<&str>, name: &'static str) -> Result<i64, DimensionsError> {
    let token = token.ok_or(DimensionsError::InvalidEmbed(name))?;
    token
        .replace(&format!("{name}="), "")
        .replace('"', "")
        .trim()
        .parse()
        .map_err(|_| DimensionsError::InvalidEmbed(name))
}

fn as_pixels(value: &Value, field: &'static str) -> Result<i64, DimensionsError> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .ok_or(DimensionsError::InvalidValue(field)),
        Value::String(text) => {
            text.trim().parse().map_err(|_| DimensionsError::InvalidValue(field))
        }
        _ => Err(DimensionsError::InvalidValue(field)),
    }
}
