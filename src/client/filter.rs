//! 本地过滤：对快照做大小写不敏感的子串匹配
//! Local filter: case-insensitive substring match over a snapshot
//!
//! 过滤是纯函数，结果保持快照原有顺序。字段通过枚举访问器取值，
//! 记录上不存在的字段按空字符串处理。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{City, Hotel};

/// 可浏览的数据表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Cities,
    Hotels,
}

impl Table {
    /// 每张表可选的搜索字段
    pub fn field_options(self) -> &'static [Field] {
        match self {
            Table::Cities => &[Field::Id, Field::Name],
            Table::Hotels => &[
                Field::Id,
                Field::Name,
                Field::City,
                Field::Capacity,
                Field::Price,
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Table::Cities => "cities",
            Table::Hotels => "hotels",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cities" => Ok(Table::Cities),
            "hotels" => Ok(Table::Hotels),
            other => Err(format!("unknown table '{}', expected cities or hotels", other)),
        }
    }
}

/// 逻辑搜索字段；酒店的 `city` 对应 `city_name`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Id,
    Name,
    City,
    Capacity,
    Price,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::City => "city",
            Field::Capacity => "capacity",
            Field::Price => "price",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Field::Id),
            "name" => Ok(Field::Name),
            "city" => Ok(Field::City),
            "capacity" => Ok(Field::Capacity),
            "price" => Ok(Field::Price),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// 按字段取值的记录
/// A record whose fields can be read by tag
pub trait Searchable {
    /// 字段文本；记录没有该字段时返回 None
    fn field_text(&self, field: Field) -> Option<String>;
}

impl Searchable for City {
    fn field_text(&self, field: Field) -> Option<String> {
        match field {
            Field::Id => Some(self.id.to_string()),
            Field::Name => Some(self.name.clone()),
            Field::City | Field::Capacity | Field::Price => None,
        }
    }
}

impl Searchable for Hotel {
    fn field_text(&self, field: Field) -> Option<String> {
        match field {
            Field::Id => Some(self.id.to_string()),
            Field::Name => Some(self.name.clone()),
            Field::City => Some(self.city_name.clone()),
            Field::Capacity => Some(self.capacity.to_string()),
            Field::Price => Some(self.price.to_string()),
        }
    }
}

/// 搜索参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub table: Table,
    pub field: Field,
    pub query: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            table: Table::Hotels,
            field: Field::Name,
            query: String::new(),
        }
    }
}

/// 过滤单个快照
///
/// 查询为空或全空白时返回整个快照；否则按小写后的子串包含关系匹配。
pub fn filter<'a, T: Searchable>(snapshot: &'a [T], field: Field, query: &str) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return snapshot.iter().collect();
    }
    let needle = query.to_lowercase();
    snapshot
        .iter()
        .filter(|record| {
            record
                .field_text(field)
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// 过滤结果视图
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Cities(Vec<&'a City>),
    Hotels(Vec<&'a Hotel>),
}

impl View<'_> {
    pub fn len(&self) -> usize {
        match self {
            View::Cities(rows) => rows.len(),
            View::Hotels(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 按参数选择表并过滤
pub fn filter_view<'a>(cities: &'a [City], hotels: &'a [Hotel], params: &SearchParams) -> View<'a> {
    match params.table {
        Table::Cities => View::Cities(filter(cities, params.field, &params.query)),
        Table::Hotels => View::Hotels(filter(hotels, params.field, &params.query)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn cities() -> Vec<City> {
        vec![City::new(2, "Lyon"), City::new(1, "Paris")]
    }

    fn hotels() -> Vec<Hotel> {
        vec![
            Hotel {
                id: 1,
                name: "Grand".to_string(),
                city_id: Some(1),
                city_name: "Paris".to_string(),
                capacity: 50,
                price: Decimal::new(12000, 2),
            },
            Hotel {
                id: 2,
                name: "Inn".to_string(),
                city_id: None,
                city_name: String::new(),
                capacity: 10,
                price: Decimal::new(4000, 2),
            },
        ]
    }

    #[test]
    fn test_empty_query_returns_snapshot_in_order() {
        let snapshot = cities();
        let result = filter(&snapshot, Field::Name, "");
        assert_eq!(result, snapshot.iter().collect::<Vec<_>>());

        let result = filter(&snapshot, Field::Name, "   \t");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Lyon");
    }

    #[test]
    fn test_case_insensitive_substring() {
        let snapshot = cities();
        let result = filter(&snapshot, Field::Name, "PAR");
        assert_eq!(result, vec![&snapshot[1]]);

        let result = filter(&snapshot, Field::Name, "yo");
        assert_eq!(result, vec![&snapshot[0]]);
    }

    #[test]
    fn test_city_field_maps_to_city_name() {
        let snapshot = hotels();
        let result = filter(&snapshot, Field::City, "par");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Grand");
    }

    #[test]
    fn test_numeric_fields_as_text() {
        let snapshot = hotels();
        assert_eq!(filter(&snapshot, Field::Capacity, "10")[0].name, "Inn");
        assert_eq!(filter(&snapshot, Field::Price, "120.00")[0].name, "Grand");
        assert_eq!(filter(&snapshot, Field::Id, "2")[0].name, "Inn");
    }

    #[test]
    fn test_absent_field_matches_nothing() {
        let snapshot = cities();
        assert!(filter(&snapshot, Field::Price, "1").is_empty());
        assert_eq!(filter(&snapshot, Field::Price, "").len(), 2);
    }

    #[test]
    fn test_result_keeps_snapshot_order() {
        let snapshot = vec![City::new(3, "Nice"), City::new(4, "Annecy"), City::new(5, "Nancy")];
        let names: Vec<&str> = filter(&snapshot, Field::Name, "n")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Nice", "Annecy", "Nancy"]);
    }

    #[test]
    fn test_filter_view_selects_table() {
        let (c, h) = (cities(), hotels());
        let params = SearchParams {
            table: Table::Hotels,
            field: Field::City,
            query: "par".to_string(),
        };
        match filter_view(&c, &h, &params) {
            View::Hotels(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].id, 1);
            }
            other => panic!("unexpected view {:?}", other),
        }

        let params = SearchParams {
            table: Table::Cities,
            ..SearchParams::default()
        };
        assert_eq!(filter_view(&c, &h, &params).len(), 2);
    }

    #[test]
    fn test_field_options() {
        assert_eq!(Table::Cities.field_options(), &[Field::Id, Field::Name]);
        assert_eq!(Table::Hotels.field_options().len(), 5);
        assert!(Table::Hotels.field_options().contains(&Field::City));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Hotels".parse::<Table>().unwrap(), Table::Hotels);
        assert_eq!("city".parse::<Field>().unwrap(), Field::City);
        assert!("rooms".parse::<Field>().is_err());
        assert!("flights".parse::<Table>().is_err());
    }
}
