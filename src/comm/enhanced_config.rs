use crate::comm::config::{ConfigManager, ConfigSource};
use crate::comm::config_validator::{AppConfiguration, ConfigValidator, EnvironmentConfigLoader};
use crate::db::connection::build_postgres_url;
use crate::error::AppResult;
use config::FileFormat;
use tracing::{debug, info};
use url::Url;

/// 环境变量前缀，例如 `LISTING_SERVER__PORT`
pub const ENV_PREFIX: &str = "LISTING";

/// 增强的配置管理器：分层加载、映射为 `AppConfiguration` 并验证
pub struct EnhancedConfigManager {
    config_manager: ConfigManager,
    env_loader: EnvironmentConfigLoader,
    app_config: AppConfiguration,
}

impl EnhancedConfigManager {
    /// 按当前环境加载：default.toml → <env>.toml → local.toml → 环境变量
    pub fn new() -> AppResult<Self> {
        let env_loader = EnvironmentConfigLoader::new();
        info!("当前环境: {}", env_loader.get_environment());

        let mut sources: Vec<ConfigSource> = env_loader
            .get_config_paths()
            .into_iter()
            .map(|path| ConfigSource::File {
                path,
                format: Some(FileFormat::Toml),
                required: false,
            })
            .collect();

        sources.push(ConfigSource::Env {
            prefix: ENV_PREFIX.to_string(),
            separator: "__",
        });

        Self::with_sources(env_loader, sources)
    }

    /// 使用指定配置源构建（测试或嵌入场景）
    pub fn with_sources(
        env_loader: EnvironmentConfigLoader,
        sources: Vec<ConfigSource>,
    ) -> AppResult<Self> {
        let config_manager = ConfigManager::with_sources(sources)?;
        let app_config = Self::load_app_config(&config_manager, &ConfigValidator::new())?;

        Ok(Self {
            config_manager,
            env_loader,
            app_config,
        })
    }

    /// 加载应用配置
    fn load_app_config(
        config_manager: &ConfigManager,
        validator: &ConfigValidator,
    ) -> AppResult<AppConfiguration> {
        let mut app_config = AppConfiguration::default();

        if let Ok(host) = config_manager.get_string("server.host") {
            app_config.server_host = host;
        }

        if let Ok(port) = config_manager.get::<u16>("server.port") {
            app_config.server_port = port;
        }

        if let Ok(workers) = config_manager.get::<usize>("server.workers") {
            app_config.server_workers = Some(workers);
        }

        app_config.database_url = match config_manager.get_string("database.url") {
            Ok(url) => url,
            Err(_) => {
                let host: String = config_manager.get_or("database.host", "localhost".to_string());
                let port: String = config_manager.get_or("database.port", "5432".to_string());
                let user: String = config_manager.get_or("database.user", "postgres".to_string());
                let pass: String = config_manager.get_or("database.pass", "12345".to_string());
                let name: String = config_manager.get_or("database.name", "wb".to_string());
                build_postgres_url(&host, &port, &user, &pass, &name)
            }
        };

        if let Ok(max_conn) = config_manager.get::<u32>("database.max_connections") {
            app_config.database_max_connections = max_conn;
        }

        if let Ok(secs) = config_manager.get::<u64>("database.acquire_timeout_secs") {
            app_config.database_acquire_timeout_secs = secs;
        }

        if let Ok(level) = config_manager.get_string("logging.level") {
            app_config.logging_level = level;
        }

        if let Ok(json_format) = config_manager.get::<bool>("logging.json_format") {
            app_config.logging_json_format = json_format;
        }

        if let Ok(origins) = config_manager.get::<Vec<String>>("cors.allowed_origins") {
            app_config.cors_allowed_origins = origins;
        }

        if let Ok(expose) = config_manager.get::<bool>("listing.expose_store_errors") {
            app_config.expose_store_errors = expose;
        }

        validator.validate_config(&app_config)?;

        debug!("应用配置: {:?}", Self::masked(&app_config));
        Ok(app_config)
    }

    /// 获取应用配置
    pub fn get_app_config(&self) -> &AppConfiguration {
        &self.app_config
    }

    /// 消费自身并返回应用配置
    pub fn into_app_config(self) -> AppConfiguration {
        self.app_config
    }

    /// 打印配置摘要
    pub fn print_config_summary(&self) {
        info!("=== 配置摘要 ===");
        info!("环境: {}", self.env_loader.get_environment());
        info!(
            "服务器: {}:{}",
            self.app_config.server_host, self.app_config.server_port
        );
        info!("工作线程: {:?}", self.app_config.server_workers);
        info!("日志级别: {}", self.app_config.logging_level);
        info!("JSON日志: {}", self.app_config.logging_json_format);
        info!("数据库: {}", mask_sensitive_info(&self.app_config.database_url));
        info!("连接池大小: {}", self.app_config.database_max_connections);
        info!("跨域来源: {:?}", self.app_config.cors_allowed_origins);
        info!("返回原始数据库错误: {}", self.app_config.expose_store_errors);

        self.config_manager.print_sources_info();
    }

    fn masked(app_config: &AppConfiguration) -> AppConfiguration {
        AppConfiguration {
            database_url: mask_sensitive_info(&app_config.database_url),
            ..app_config.clone()
        }
    }
}

/// 屏蔽连接串中的密码（`://user:***@host`）
///
/// 按 URL 语法解析，密码中的 `@` 也能正确处理；无法解析时整段凭据都被屏蔽。
pub fn mask_sensitive_info(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_none() {
                return raw.to_string();
            }
            if url.set_password(Some("***")).is_err() {
                return mask_credentials(raw);
            }
            url.to_string()
        }
        Err(_) => mask_credentials(raw),
    }
}

/// 回退：屏蔽 `://` 与最后一个 `@` 之间的全部内容
fn mask_credentials(raw: &str) -> String {
    let Some(start) = raw.find("://") else {
        return raw.to_string();
    };
    let credentials_start = start + 3;
    match raw[credentials_start..].rfind('@') {
        Some(at_pos) => {
            let mut result = raw.to_string();
            result.replace_range(credentials_start..credentials_start + at_pos, "***");
            result
        }
        None => raw.to_string(),
    }
}
