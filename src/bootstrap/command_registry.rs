use clap::{value_parser, Arg, Command};

use crate::client::filter::{Field, Table};

/// 程序名称
pub const APP_NAME: &str = "hotel-listing";

/// 浏览命令默认连接的服务地址
pub const DEFAULT_BROWSE_URL: &str = "http://127.0.0.1:8080";

const TABLE_NAMES: [&str; 2] = ["cities", "hotels"];
const FIELD_NAMES: [&str; 5] = ["id", "name", "city", "capacity", "price"];

/// 构建完整的命令行应用
pub fn build_app() -> Command {
    Command::new(APP_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("城市与酒店只读列表服务 / Read-only city and hotel listing service")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(server_command())
        .subcommand(browse_command())
        .subcommand(Command::new("version").about("显示版本信息"))
}

/// `server` 子命令；未给出的参数沿用配置文件中的值
fn server_command() -> Command {
    Command::new("server")
        .about("启动 Web 服务器")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("设置服务器主机地址（覆盖 server.host）"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("设置服务器端口（覆盖 server.port）")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("WORKERS")
                .help("设置工作线程数（覆盖 server.workers）")
                .value_parser(value_parser!(usize)),
        )
}

/// `browse` 子命令：加载两份列表后在本地过滤并打印
fn browse_command() -> Command {
    Command::new("browse")
        .about("加载列表并在本地过滤 / Load listings and filter locally")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("服务地址")
                .default_value(DEFAULT_BROWSE_URL),
        )
        .arg(
            Arg::new("table")
                .short('t')
                .long("table")
                .value_name("TABLE")
                .help("数据表")
                .value_parser(TABLE_NAMES)
                .default_value(Table::Hotels.as_str()),
        )
        .arg(
            Arg::new("field")
                .short('f')
                .long("field")
                .value_name("FIELD")
                .help("搜索字段")
                .value_parser(FIELD_NAMES)
                .default_value(Field::Name.as_str()),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("QUERY")
                .help("搜索文本（大小写不敏感的子串匹配）")
                .default_value(""),
        )
}
