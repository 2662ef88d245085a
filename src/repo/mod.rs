//! 列表仓库：城市与酒店的只读查询
//! Listing repository: read-only city and hotel queries

pub mod memory;
pub mod postgres;

pub use memory::{HotelRecord, MemoryListingRepository};
pub use postgres::PgListingRepository;

use async_trait::async_trait;
use tracing::warn;

use crate::db::error::Result;
use crate::models::{City, Hotel};

/// 列表仓库 Trait，处理器只依赖该接口
/// The seam handlers depend on; one call is one query
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// 全部城市，按名称升序
    async fn list_cities(&self) -> Result<Vec<City>>;

    /// 全部酒店（左连接城市名称），按酒店名称升序
    async fn list_hotels(&self) -> Result<Vec<Hotel>>;

    /// 存储连通性检查
    async fn ping(&self) -> Result<()>;
}

/// 逐行解码，单行失败仅记录日志并跳过
/// Decode rows one by one; a row that fails is logged and dropped
pub fn decode_rows<R, T, E, F>(entity: &'static str, rows: &[R], decode: F) -> Vec<T>
where
    F: Fn(&R) -> std::result::Result<T, E>,
    E: std::fmt::Display,
{
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match decode(row) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    entity,
                    row = index,
                    error = %e,
                    "跳过无法解码的行 / skipping undecodable row"
                );
                None
            }
        })
        .collect()
}
