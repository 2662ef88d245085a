use crate::client::fetch::{ClientError, Snapshots};
use crate::client::filter::{filter_view, Field, SearchParams, Table, View};
use crate::models::{City, Hotel};

/// 浏览状态：一次加载得到的两份快照与当前搜索参数
/// Browsing state: the snapshots from one load plus the current search parameters
#[derive(Debug, Default)]
pub struct BrowserState {
    cities: Vec<City>,
    hotels: Vec<Hotel>,
    params: SearchParams,
    error: Option<String>,
    loading: bool,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 进入加载状态，清空上一次的错误
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// 应用一次加载结果；任一请求失败则两份快照都保持为空
    pub fn apply_load(&mut self, result: Result<Snapshots, ClientError>) {
        self.loading = false;
        match result {
            Ok(snapshots) => {
                self.cities = snapshots.cities;
                self.hotels = snapshots.hotels;
                self.error = None;
            }
            Err(e) => {
                self.cities.clear();
                self.hotels.clear();
                self.error = Some(e.banner());
            }
        }
    }

    /// 切换数据表：字段重置为 name，查询清空
    pub fn select_table(&mut self, table: Table) {
        self.params = SearchParams {
            table,
            field: Field::Name,
            query: String::new(),
        };
    }

    pub fn set_field(&mut self, field: Field) {
        self.params.field = field;
    }

    pub fn set_query<T: Into<String>>(&mut self, query: T) {
        self.params.query = query.into();
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    /// 当前参数下的过滤结果（每次调用重新计算）
    pub fn view(&self) -> View<'_> {
        filter_view(&self.cities, &self.hotels, &self.params)
    }
}
