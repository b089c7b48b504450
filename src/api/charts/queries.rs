use serde::Deserialize;

/// Raw listing query. Values stay strings until validated in the handler.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListDashboardsQuery {
    #[serde(default)]
    pub(super) page: Option<String>,
    #[serde(default)]
    pub(super) per_page: Option<String>,
    #[serde(default)]
    pub(super) jsondash_demo_mode: Option<String>,
}
