use async_trait::async_trait;
use rust_decimal::Decimal;

use super::ListingRepository;
use crate::db::error::{DbError, Result};
use crate::models::{City, Hotel};

/// 酒店原始行（城市以引用形式保存，与表结构一致）
/// A raw hotels-table row, city kept as a reference
#[derive(Debug, Clone)]
pub struct HotelRecord {
    pub id: i64,
    pub name: String,
    pub city: Option<i64>,
    pub capacity: i64,
    pub price: Decimal,
}

impl HotelRecord {
    pub fn new<T: Into<String>>(
        id: i64,
        name: T,
        city: Option<i64>,
        capacity: i64,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            city,
            capacity,
            price,
        }
    }
}

/// 进程内列表仓库：与 SQL 查询相同的左连接、空字符串补齐与排序语义
/// In-process store applying the same join, coalesce and ordering as the SQL queries
#[derive(Debug, Clone, Default)]
pub struct MemoryListingRepository {
    cities: Vec<City>,
    hotels: Vec<HotelRecord>,
    failure: Option<String>,
}

impl MemoryListingRepository {
    pub fn new(cities: Vec<City>, hotels: Vec<HotelRecord>) -> Self {
        Self {
            cities,
            hotels,
            failure: None,
        }
    }

    /// 所有查询都以给定信息失败（模拟存储不可达）
    pub fn failing<T: Into<String>>(message: T) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(DbError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ListingRepository for MemoryListingRepository {
    async fn list_cities(&self) -> Result<Vec<City>> {
        self.check()?;
        let mut cities = self.cities.clone();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        self.check()?;
        let mut hotels: Vec<Hotel> = self
            .hotels
            .iter()
            .map(|record| {
                let city_name = record
                    .city
                    .and_then(|id| self.cities.iter().find(|c| c.id == id))
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                Hotel {
                    id: record.id,
                    name: record.name.clone(),
                    city_id: record.city,
                    city_name,
                    capacity: record.capacity,
                    price: record.price,
                }
            })
            .collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MemoryListingRepository {
        MemoryListingRepository::new(
            vec![City::new(1, "Paris"), City::new(2, "Lyon")],
            vec![
                HotelRecord::new(1, "Grand", Some(1), 50, Decimal::new(12000, 2)),
                HotelRecord::new(2, "Inn", None, 10, Decimal::new(4000, 2)),
                HotelRecord::new(3, "Annex", Some(99), 5, Decimal::new(999, 1)),
            ],
        )
    }

    #[tokio::test]
    async fn test_cities_sorted_by_name() {
        let cities = fixture().list_cities().await.unwrap();
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Lyon", "Paris"]);
    }

    #[tokio::test]
    async fn test_hotels_left_join() {
        let hotels = fixture().list_hotels().await.unwrap();
        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Annex", "Grand", "Inn"]);

        assert_eq!(hotels[0].city_id, Some(99));
        assert_eq!(hotels[0].city_name, "");
        assert_eq!(hotels[1].city_name, "Paris");
        assert_eq!(hotels[2].city_id, None);
        assert_eq!(hotels[2].city_name, "");
    }

    #[tokio::test]
    async fn test_failing_store() {
        let repo = MemoryListingRepository::failing("connection refused");
        let err = repo.list_cities().await.unwrap_err();
        assert_eq!(err.store_message(), "connection refused");
        assert!(repo.list_hotels().await.is_err());
        assert!(repo.ping().await.is_err());
    }
}
