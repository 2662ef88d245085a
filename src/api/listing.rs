use actix_web::web;
use tracing::{error, info};

use crate::db::error::{describe_error, DbError};
use crate::error::{AppError, AppResult};
use crate::models::{City, Envelope, Hotel};
use crate::repo::ListingRepository;

pub const CITIES_PATH: &str = "/api/cities";
pub const HOTELS_PATH: &str = "/api/hotels";

/// 列表接口行为参数 / Listing endpoint behaviour
#[derive(Debug, Clone)]
pub struct ListingSettings {
    /// 为 true 时失败信封携带数据库原始错误文本
    pub expose_store_errors: bool,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            expose_store_errors: true,
        }
    }
}

impl ListingSettings {
    /// 将存储错误转换为接口错误，完整错误总是写入日志
    fn store_failure(&self, entity: &str, err: DbError) -> AppError {
        error!(entity, error = %describe_error(&err), "查询失败 / query failed");
        if self.expose_store_errors {
            AppError::database(err.store_message())
        } else {
            AppError::database(format!("failed to query {}", entity))
        }
    }
}

// 路由注册入口（GET）
// Route registration entry (GET)
pub fn register_cities(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(CITIES_PATH).route(web::get().to(list_cities)));
}

pub fn register_hotels(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(HOTELS_PATH).route(web::get().to(list_hotels)));
}

/// 获取全部城市（按名称升序）
#[utoipa::path(
    get,
    path = "/api/cities",
    tag = "Listing",
    responses(
        (status = 200, description = "全部城市，按名称升序", body = Envelope<City>),
        (status = 500, description = "数据库查询失败", body = Envelope<City>)
    )
)]
pub async fn list_cities(
    repo: web::Data<dyn ListingRepository>,
    settings: web::Data<ListingSettings>,
) -> AppResult<web::Json<Envelope<City>>> {
    let cities = repo
        .list_cities()
        .await
        .map_err(|e| settings.store_failure("cities", e))?;
    info!(count = cities.len(), "list cities");
    Ok(web::Json(Envelope::ok(cities)))
}

/// 获取全部酒店（左连接城市名称，按酒店名称升序）
#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "Listing",
    responses(
        (status = 200, description = "全部酒店，按名称升序；未匹配城市时 city_name 为空字符串", body = Envelope<Hotel>),
        (status = 500, description = "数据库查询失败", body = Envelope<Hotel>)
    )
)]
pub async fn list_hotels(
    repo: web::Data<dyn ListingRepository>,
    settings: web::Data<ListingSettings>,
) -> AppResult<web::Json<Envelope<Hotel>>> {
    let hotels = repo
        .list_hotels()
        .await
        .map_err(|e| settings.store_failure("hotels", e))?;
    info!(count = hotels.len(), "list hotels");
    Ok(web::Json(Envelope::ok(hotels)))
}
