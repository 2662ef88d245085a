use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 城市（只读，由数据库分配 id）
/// City row, read-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct City {
    pub id: i64,
    pub name: String,
}

impl City {
    pub fn new<T: Into<String>>(id: i64, name: T) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
