pub(crate) mod dashboards;
pub(crate) mod health;
