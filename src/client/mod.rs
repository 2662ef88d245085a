//! 浏览客户端：一次并发加载两份列表，之后只在内存中过滤
//! Browsing client: load both listings once, then filter in memory

pub mod fetch;
pub mod filter;
pub mod state;

pub use fetch::{ClientError, ListingClient, Snapshots};
pub use filter::{filter, filter_view, Field, SearchParams, Searchable, Table, View};
pub use state::BrowserState;
