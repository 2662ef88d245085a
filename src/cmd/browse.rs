use clap::ArgMatches;

use crate::client::fetch::ListingClient;
use crate::client::filter::{Field, Table, View};
use crate::client::state::BrowserState;
use crate::command_registry::DEFAULT_BROWSE_URL;
use crate::comm::init_tracing;

/// 处理 `browse` 命令：一次加载，本地过滤，打印结果
pub async fn handle_browse_command(matches: &ArgMatches) -> anyhow::Result<()> {
    init_tracing("warn", false);

    let url = matches
        .get_one::<String>("url")
        .map(String::as_str)
        .unwrap_or(DEFAULT_BROWSE_URL);
    let table = parse_arg::<Table>(matches, "table")?.unwrap_or(Table::Hotels);
    let field = parse_arg::<Field>(matches, "field")?.unwrap_or(Field::Name);
    let query = matches.get_one::<String>("query").cloned().unwrap_or_default();

    let client = ListingClient::new(url);
    let mut state = BrowserState::new();
    state.begin_load();
    state.apply_load(client.load().await);

    if let Some(banner) = state.error() {
        anyhow::bail!("{}", banner);
    }

    state.select_table(table);
    state.set_field(field);
    state.set_query(query);

    print!("{}", render_view(&state.view()));
    Ok(())
}

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    matches
        .get_one::<String>(name)
        .map(|value| value.parse::<T>().map_err(anyhow::Error::msg))
        .transpose()
}

const CITY_COLUMNS: &[&str] = &["id", "name"];
const HOTEL_COLUMNS: &[&str] = &["id", "name", "city", "capacity", "price"];

/// 将过滤结果渲染为左对齐的文本表格
pub fn render_view(view: &View<'_>) -> String {
    let (header, rows): (&[&str], Vec<Vec<String>>) = match view {
        View::Cities(cities) => (
            CITY_COLUMNS,
            cities
                .iter()
                .map(|c| vec![c.id.to_string(), c.name.clone()])
                .collect(),
        ),
        View::Hotels(hotels) => (
            HOTEL_COLUMNS,
            hotels
                .iter()
                .map(|h| {
                    vec![
                        h.id.to_string(),
                        h.name.clone(),
                        h.city_name.clone(),
                        h.capacity.to_string(),
                        h.price.to_string(),
                    ]
                })
                .collect(),
        ),
    };

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format_line(header.iter().copied(), &widths);
    for row in &rows {
        out.push_str(&format_line(row.iter().map(String::as_str), &widths));
    }
    out.push_str(&format!("({} rows)\n", rows.len()));
    out
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}
