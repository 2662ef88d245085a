use actix_web::web;
use tracing::info;

use crate::api::{health, listing};

/// 路由配置函数类型
pub type RouteConfigFn = fn(&mut web::ServiceConfig);

/// 路由信息结构
#[derive(Debug, Clone, Copy)]
pub struct RouteInfo {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub module: &'static str,
    pub config_fn: RouteConfigFn,
}

/// 全部路由表
pub const ROUTES: &[RouteInfo] = &[
    RouteInfo {
        name: "list_cities",
        method: "GET",
        path: listing::CITIES_PATH,
        description: "全部城市，按名称升序",
        module: "listing",
        config_fn: listing::register_cities,
    },
    RouteInfo {
        name: "list_hotels",
        method: "GET",
        path: listing::HOTELS_PATH,
        description: "全部酒店（含城市名称），按名称升序",
        module: "listing",
        config_fn: listing::register_hotels,
    },
    RouteInfo {
        name: "health",
        method: "GET",
        path: health::HEALTH_PATH,
        description: "基础健康检查",
        module: "health",
        config_fn: health::register_health,
    },
    RouteInfo {
        name: "ready",
        method: "GET",
        path: health::READY_PATH,
        description: "就绪检查（探测数据库）",
        module: "health",
        config_fn: health::register_ready,
    },
];

/// 获取指定模块的路由
pub fn get_routes_by_module(module: &str) -> Vec<&'static RouteInfo> {
    ROUTES.iter().filter(|route| route.module == module).collect()
}

/// 配置所有路由到 ServiceConfig
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for route_info in ROUTES {
        (route_info.config_fn)(cfg);
    }
}

/// 启动前打印路由映射 / Print route map before start
pub fn print_routes_info(addr: &str) {
    info!("路由注册信息 / Registered routes:");
    for route in ROUTES {
        info!(
            "   {:<4} http://{}{} - {}",
            route.method, addr, route.path, route.description
        );
    }
    info!("   GET  http://{}/swagger-ui/ - API 文档", addr);
    info!("总计: {} 个路由", ROUTES.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_route_paths_unique() {
        let paths: HashSet<&str> = ROUTES.iter().map(|r| r.path).collect();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_routes_by_module() {
        let listing: Vec<&str> = get_routes_by_module("listing")
            .iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(listing, vec!["/api/cities", "/api/hotels"]);
        assert_eq!(get_routes_by_module("health").len(), 2);
    }
}
