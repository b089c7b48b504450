pub(crate) mod charts_config;
pub(crate) mod dimensions;
pub(crate) mod pagination;
pub(crate) mod static_assets;
pub(crate) mod static_files;
pub(crate) mod uploads;
