use crate::core::config::StaticOverrides;
use crate::services::charts_config::ChartsConfig;

const STATIC_URL_PREFIX: &str = "/static/";

/// Points every chart library asset at a locally hosted copy.
///
/// Only the file name of each CDN url is kept, so
/// `//cdnjs.cloudflare.com/foo/bar/foo.js` with a `js_path` of `js/vendor/`
/// becomes `/static/js/vendor/foo.js`. Local files must carry the same names
/// as the ones in the charts config.
pub(crate) fn local_static(mut config: ChartsConfig, overrides: &StaticOverrides) -> ChartsConfig {
    for family in config.values_mut() {
        rewrite_urls(&mut family.js_url, &overrides.js_path);
        rewrite_urls(&mut family.css_url, &overrides.css_path);
    }
    config
}

/// The charts config a page should use: rewritten when overrides are set.
pub(crate) fn effective_config(
    config: &ChartsConfig,
    overrides: Option<&StaticOverrides>,
) -> ChartsConfig {
    match overrides {
        Some(overrides) => local_static(config.clone(), overrides),
        None => config.clone(),
    }
}

pub(crate) fn static_url(filename: &str) -> String {
    format!("{STATIC_URL_PREFIX}{}", filename.trim_start_matches('/'))
}

fn rewrite_urls(urls: &mut [String], prefix: &str) {
    for url in urls.iter_mut() {
        let filename = url.rsplit('/').next().unwrap_or(url.as_str());
        *url = static_url(&format!("{prefix}{filename}"));
    }
}
