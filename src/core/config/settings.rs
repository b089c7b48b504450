use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment, parse_flag,
    parse_i64, parse_static_overrides, parse_u16, parse_u64,
};
use super::types::{
    ApiSettings, ConfigError, CorsSettings, DashboardSettings, DatabaseSettings, RuntimeSettings,
    ServerHost, ServerPort, ServerSettings, Settings, StorageSettings, TelemetrySettings,
};

const DEFAULT_PER_PAGE: &str = "25";

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("JSONDASH_HOST", "0.0.0.0");
        let port = env_or_default("JSONDASH_PORT", "8000");

        let environment = parse_environment(
            env_optional("JSONDASH_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );
        let strict_config =
            env_optional("JSONDASH_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "jsondash");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "jsondash");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "jsondash");
        let database_url = env_optional("DATABASE_URL");

        let max_upload_size_mb =
            parse_u64("MAX_UPLOAD_SIZE_MB", env_or_default("MAX_UPLOAD_SIZE_MB", "10"))?;
        let upload_dir = env_or_default("JSONDASH_UPLOAD_DIR", "uploads");
        let static_root = env_or_default("JSONDASH_STATIC_ROOT", "static");

        let per_page =
            parse_i64("JSONDASH_PERPAGE", env_or_default("JSONDASH_PERPAGE", DEFAULT_PER_PAGE))?;
        let filter_users = parse_flag("JSONDASH_FILTERUSERS");
        let global_dashboards = parse_flag("JSONDASH_GLOBALDASH");
        let global_user = env_or_default("JSONDASH_GLOBAL_USER", "global");
        let user_header =
            env_or_default("JSONDASH_USER_HEADER", "x-jsondash-user").to_ascii_lowercase();
        let charts_config_path = env_optional("JSONDASH_CHARTS_CONFIG");
        let static_overrides = parse_static_overrides(
            env_optional("JSONDASH_STATIC_JS_PATH"),
            env_optional("JSONDASH_STATIC_CSS_PATH"),
        );

        let log_level = env_or_default("JSONDASH_LOG_LEVEL", "info");
        let json = parse_flag("JSONDASH_LOG_JSON");
        let prometheus_enabled = parse_flag("PROMETHEUS_ENABLED");

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
            },
            storage: StorageSettings { max_upload_size_mb, upload_dir, static_root },
            dashboard: DashboardSettings {
                per_page,
                filter_users,
                global_dashboards,
                global_user,
                user_header,
                charts_config_path,
                static_overrides,
            },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    pub(crate) fn dashboard(&self) -> &DashboardSettings {
        &self.dashboard
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.per_page < 1 {
            return Err(ConfigError::InvalidValue {
                field: "JSONDASH_PERPAGE",
                value: self.dashboard.per_page.to_string(),
            });
        }

        if self.storage.max_upload_size_mb == 0 {
            return Err(ConfigError::InvalidValue {
                field: "MAX_UPLOAD_SIZE_MB",
                value: "0".to_string(),
            });
        }

        if self.storage.upload_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "JSONDASH_UPLOAD_DIR",
                value: String::from("<empty>"),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }

        if let Some(path) = &self.dashboard.charts_config_path {
            if !std::path::Path::new(path).is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "JSONDASH_CHARTS_CONFIG",
                    value: path.clone(),
                });
            }
        }

        Ok(())
    }
}
