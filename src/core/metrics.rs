use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

pub(crate) fn record_upload(outcome: &'static str) {
    metrics::counter!("dashboard_uploads_total", "outcome" => outcome).increment(1);
}

pub(crate) fn record_listing(view_count: usize) {
    metrics::counter!("dashboard_listings_total").increment(1);
    metrics::histogram!("dashboard_listing_views").record(view_count as f64);
}

pub(crate) fn record_static_denied() {
    metrics::counter!("static_access_denied_total").increment(1);
}
