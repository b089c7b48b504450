use serde::Serialize;

use crate::core::config::StaticOverrides;
use crate::core::time::format_view_date;
use crate::db::models::Dashboard;
use crate::services::charts_config::ChartsConfig;
use crate::services::pagination::Pagination;

/// A dashboard view as handed to the page, with its date already stringified.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DashboardViewResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) created_by: Option<String>,
    pub(crate) date: String,
    pub(crate) modules: Vec<serde_json::Value>,
}

impl From<Dashboard> for DashboardViewResponse {
    fn from(view: Dashboard) -> Self {
        Self {
            id: view.id,
            name: view.name,
            created_by: view.created_by,
            date: format_view_date(view.date),
            modules: view.modules.0,
        }
    }
}

/// Everything the dashboards overview page renders from.
#[derive(Debug, Serialize)]
pub(crate) struct DashboardListResponse {
    pub(crate) views: Vec<DashboardViewResponse>,
    pub(crate) view: Option<DashboardViewResponse>,
    pub(crate) paginator: Option<Pagination>,
    pub(crate) total_modules: usize,
    pub(crate) static_config: Option<StaticOverrides>,
    pub(crate) charts_config: ChartsConfig,
    pub(crate) page_title: &'static str,
    pub(crate) demo_mode: bool,
    pub(crate) global_dashuser: String,
    pub(crate) global_dashboards: bool,
    pub(crate) username: Option<String>,
    pub(crate) filter_dashboards: bool,
}
