use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 酒店（左连接城市名称后的视图）
/// Hotel row joined with its resolved city name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    /// 城市引用，可能为空或指向不存在的城市
    pub city_id: Option<i64>,
    /// 未匹配到城市时为空字符串
    pub city_name: String,
    pub capacity: i64,
    /// 精确小数，以保留小数位的 JSON 数字序列化（如 120.00）
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 120.00)]
    pub price: Decimal,
}
