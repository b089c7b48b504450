use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::Settings;

const DEFAULT_CHARTS_CONFIG: &str = include_str!("../../assets/charts_config.json");

/// Chart library family name (e.g. `C3`) mapped to its assets and chart types.
pub(crate) type ChartsConfig = BTreeMap<String, ChartFamily>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ChartFamily {
    /// `(type, label)` pairs.
    #[serde(default)]
    pub(crate) charts: Vec<(String, String)>,
    #[serde(default)]
    pub(crate) dependencies: Vec<String>,
    #[serde(default)]
    pub(crate) js_url: Vec<String>,
    #[serde(default)]
    pub(crate) css_url: Vec<String>,
    #[serde(default = "default_enabled")]
    pub(crate) enabled: bool,
    #[serde(default)]
    pub(crate) help_link: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum ChartsConfigError {
    #[error("failed to read charts config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid charts config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_enabled() -> bool {
    true
}

pub(crate) fn load(settings: &Settings) -> Result<ChartsConfig, ChartsConfigError> {
    match &settings.dashboard().charts_config_path {
        Some(path) => load_from_path(Path::new(path)),
        None => parse(DEFAULT_CHARTS_CONFIG),
    }
}

pub(crate) fn load_from_path(path: &Path) -> Result<ChartsConfig, ChartsConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ChartsConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse(&raw)
}

pub(crate) fn parse(raw: &str) -> Result<ChartsConfig, ChartsConfigError> {
    Ok(serde_json::from_str(raw)?)
}
