use utoipa::OpenApi;

use crate::api::health::{HealthResponse, ReadyResponse};
use crate::models::{City, Hotel};

/// OpenAPI 文档聚合
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::listing::list_cities,
        crate::api::listing::list_hotels,
        crate::api::health::health_check,
        crate::api::health::ready_check,
    ),
    components(
        schemas(
            City,
            Hotel,
            HealthResponse,
            ReadyResponse,
        )
    ),
    tags(
        (name = "Listing", description = "城市与酒店只读列表接口"),
        (name = "Health", description = "健康检查相关接口")
    )
)]
pub struct ApiDoc;
