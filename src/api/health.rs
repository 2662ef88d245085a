use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::listing::ListingSettings;
use crate::repo::ListingRepository;

pub const HEALTH_PATH: &str = "/health";
pub const READY_PATH: &str = "/health/ready";

/// 隐藏存储错误时就绪检查返回的文本
pub const STORE_UNAVAILABLE: &str = "store unavailable";

/// 健康检查响应模型
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// 就绪检查响应模型
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    pub store: String,
    pub timestamp: String,
}

pub fn register_health(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(HEALTH_PATH).route(web::get().to(health_check)));
}

pub fn register_ready(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(READY_PATH).route(web::get().to(ready_check)));
}

/// 基础健康检查（不访问数据库）
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "服务存活", body = HealthResponse))
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// 就绪检查：执行一次存储探测；存储错误文本受 `expose_store_errors` 控制
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "存储可用", body = ReadyResponse),
        (status = 503, description = "存储不可用", body = ReadyResponse)
    )
)]
pub async fn ready_check(
    repo: web::Data<dyn ListingRepository>,
    settings: web::Data<ListingSettings>,
) -> impl Responder {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match repo.ping().await {
        Ok(()) => HttpResponse::Ok().json(ReadyResponse {
            status: "ready".to_string(),
            store: "ok".to_string(),
            timestamp,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "就绪检查失败 / readiness check failed");
            let store = if settings.expose_store_errors {
                e.store_message()
            } else {
                STORE_UNAVAILABLE.to_string()
            };
            HttpResponse::ServiceUnavailable().json(ReadyResponse {
                status: "unavailable".to_string(),
                store,
                timestamp,
            })
        }
    }
}
