use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use tracing::{debug, error, info, instrument};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::listing::ListingSettings;
use crate::api::swagger::ApiDoc;
use crate::comm::config_validator::AppConfiguration;
use crate::db::connection::{connect_pool, PoolSettings};
use crate::db::error::describe_error;
use crate::error::{AppError, AppResult};
use crate::repo::{ListingRepository, PgListingRepository};
use crate::route_registry::{configure_routes, print_routes_info};

/// 应用配置结构体
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub pool: PoolSettings,
    pub cors_allowed_origins: Vec<String>,
    pub listing: ListingSettings,
}

impl From<&AppConfiguration> for AppConfig {
    fn from(cfg: &AppConfiguration) -> Self {
        Self {
            host: cfg.server_host.clone(),
            port: cfg.server_port,
            workers: cfg.server_workers,
            pool: PoolSettings::from(cfg),
            cors_allowed_origins: cfg.cors_allowed_origins.clone(),
            listing: ListingSettings {
                expose_store_errors: cfg.expose_store_errors,
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from(&AppConfiguration::default())
    }
}

/// 应用启动器
pub struct AppBootstrap {
    config: AppConfig,
}

impl AppBootstrap {
    /// 创建新的应用启动器
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// 设置配置
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置主机地址
    pub fn with_host(mut self, host: String) -> Self {
        self.config.host = host;
        self
    }

    /// 设置端口
    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// 设置工作线程数
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = Some(workers);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 运行应用服务器
    ///
    /// 先建立数据库连接池，失败则拒绝启动；连接池只构建一次并注入处理器。
    #[instrument(skip(self), fields(host = %self.config.host, port = self.config.port))]
    pub async fn run(self) -> AppResult<()> {
        let pool = connect_pool(&self.config.pool).await.map_err(|e| {
            error!("数据库连接失败，服务不会启动: {}", describe_error(&e));
            AppError::database(e.store_message())
        })?;

        let repo: Arc<dyn ListingRepository> = Arc::new(PgListingRepository::new(pool));
        self.serve(repo).await
    }

    /// 使用给定仓库启动 HTTP 服务器
    pub async fn serve(self, repo: Arc<dyn ListingRepository>) -> AppResult<()> {
        let config = self.config;
        let addr = format!("{}:{}", config.host, config.port);

        let repo_data: web::Data<dyn ListingRepository> = web::Data::from(repo);
        let settings = web::Data::new(config.listing.clone());
        let origins = config.cors_allowed_origins.clone();

        print_routes_info(&addr);
        info!("服务器将在 {} 上启动", addr);

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .wrap(build_cors(&origins))
                .app_data(repo_data.clone())
                .app_data(settings.clone())
                // 集成 Swagger UI 文档（使用通配路径以兼容静态资源与尾随斜杠）
                .service(
                    SwaggerUi::new("/swagger-ui/{_:.*}")
                        .url("/api-doc/openapi.json", ApiDoc::openapi()),
                )
                .configure(configure_routes)
        });
        if let Some(workers) = config.workers {
            server = server.workers(workers);
        }

        server
            .bind(&addr)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?
            .run()
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        info!("服务器已停止");
        Ok(())
    }
}

impl Default for AppBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

/// 跨域策略：`*` 允许任意来源，否则逐个登记；两种情况都允许携带凭据
/// CORS policy built from `cors.allowed_origins`, credentials allowed
pub fn build_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
        debug!("CORS: 允许任意来源 / allowing any origin");
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: 允许来源 / allowed origins: {:?}", origins);
    }
    cors
}
