use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    ///
    /// `config.toml` -> `config.<APP_ENV>.toml` -> `COURSE_FEEDBACK_*` 环境变量，
    /// 最后是少量常用的独立环境变量。
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{env}")).required(false))
            .add_source(
                Environment::with_prefix("COURSE_FEEDBACK")
                    .separator("_")
                    .try_parsing(true),
            )
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            // 远端反馈库与草稿缓存
            .set_override_option("remote.url", std::env::var("REMOTE_DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            // 问卷开关的初始值
            .set_override_option(
                "survey.allow_anonymous",
                std::env::var("ALLOW_ANONYMOUS_FEEDBACK").ok(),
            )?
            .set_override_option(
                "survey.disable_edits_after_submit",
                std::env::var("DISABLE_EDITS_AFTER_SUBMIT").ok(),
            )?;

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers).max(1);
        }
        if app_config.survey.max_comments == 0 {
            return Err(ConfigError::Message(
                "survey.max_comments must keep at least one comment per subject".into(),
            ));
        }
        if app_config.survey.activity_log_capacity == 0 {
            return Err(ConfigError::Message(
                "survey.activity_log_capacity must be positive".into(),
            ));
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load course feedback configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时调用一次
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 配置了 Unix 套接字时优先于 TCP 监听
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const BASE: &str = include_str!("../../config.toml");

    fn from_toml(extra: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_builder(
            Config::builder()
                .add_source(File::from_str(BASE, FileFormat::Toml))
                .add_source(File::from_str(extra, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_default_file_runs_local_only_with_survey_defaults() {
        let config = from_toml("").unwrap();
        assert!(config.remote.url.is_empty());
        assert!(config.survey.allow_anonymous);
        assert!(config.survey.disable_edits_after_submit);
        assert_eq!(config.survey.max_comments, 50);
        assert!(config.server.workers >= 1);
        assert!(config.server.workers <= config.server.max_workers);
    }

    #[test]
    fn test_survey_section_overrides() {
        let config = from_toml("[survey]\nallow_anonymous = false\nmax_comments = 5\n").unwrap();
        assert!(!config.survey.allow_anonymous);
        assert_eq!(config.survey.max_comments, 5);
        assert_eq!(config.survey.activity_log_capacity, 200);
    }

    #[test]
    fn test_zero_comment_limit_is_rejected() {
        let err = from_toml("[survey]\nmax_comments = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_comments"));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_socket_path_binds_tcp() {
        let config = from_toml("").unwrap();
        assert_eq!(config.unix_socket_path(), None);
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
    }
}
