use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::{decode_rows, ListingRepository};
use crate::db::connection::check_health;
use crate::db::error::Result;
use crate::models::{City, Hotel};

const SQL_LIST_CITIES: &str = "SELECT id::bigint AS id, name FROM cities ORDER BY name";

const SQL_LIST_HOTELS: &str = r#"
    SELECT h.id::bigint AS id,
           h.name,
           h.city::bigint AS city_id,
           COALESCE(c.name, '') AS city_name,
           h.capacity::bigint AS capacity,
           h.price::numeric AS price
    FROM hotels h
    LEFT JOIN cities c ON h.city = c.id
    ORDER BY h.name
"#;

/// PostgreSQL 列表仓库，持有注入的连接池
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn list_cities(&self) -> Result<Vec<City>> {
        let rows: Vec<PgRow> = sqlx::query(SQL_LIST_CITIES).fetch_all(&self.pool).await?;
        let cities = decode_rows("city", &rows, |row| City::from_row(row));
        debug!(rows = rows.len(), decoded = cities.len(), "list cities");
        Ok(cities)
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        let rows: Vec<PgRow> = sqlx::query(SQL_LIST_HOTELS).fetch_all(&self.pool).await?;
        let hotels = decode_rows("hotel", &rows, |row| Hotel::from_row(row));
        debug!(rows = rows.len(), decoded = hotels.len(), "list hotels");
        Ok(hotels)
    }

    async fn ping(&self) -> Result<()> {
        check_health(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sqlx::postgres::PgPoolOptions;

    /// 单连接池：临时表只在当前会话可见，并遮蔽同名正式表
    async fn temp_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();

        for sql in [
            "CREATE TEMP TABLE cities (id integer, name text)",
            "CREATE TEMP TABLE hotels (id integer, name text, city integer, capacity integer, price numeric(10,2))",
            "INSERT INTO cities VALUES (1, 'Paris'), (2, 'Lyon'), (3, NULL)",
            "INSERT INTO hotels VALUES (1, 'Grand', 1, 50, 120.00), (2, 'Inn', 99, 10, 40.00), (3, NULL, 1, 5, 1.00), (4, 'Annex', NULL, 8, 75.50)",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }
        pool
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
    async fn test_undecodable_rows_are_skipped() {
        let repo = PgListingRepository::new(temp_pool().await);

        let cities = repo.list_cities().await.unwrap();
        assert_eq!(cities, vec![City::new(2, "Lyon"), City::new(1, "Paris")]);

        let hotels = repo.list_hotels().await.unwrap();
        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Annex", "Grand", "Inn"]);
        assert_eq!(hotels[0].city_id, None);
        assert_eq!(hotels[0].city_name, "");
        assert_eq!(hotels[1].city_name, "Paris");
        assert_eq!(hotels[1].price, Decimal::new(12000, 2));
        assert_eq!(hotels[2].city_id, Some(99));
        assert_eq!(hotels[2].city_name, "");

        repo.ping().await.unwrap();
    }
}
