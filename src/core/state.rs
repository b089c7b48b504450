use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;
use crate::services::charts_config::ChartsConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    charts_config: ChartsConfig,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, charts_config: ChartsConfig) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, charts_config }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Chart library catalogue as loaded at startup, before any static rewriting.
    pub(crate) fn charts_config(&self) -> &ChartsConfig {
        &self.inner.charts_config
    }
}
