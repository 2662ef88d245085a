use chrono::{Datelike, Timelike};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

struct LogTimer;

impl fmt::time::FormatTime for LogTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        let cs = now.timestamp_subsec_millis() / 10;
        let s = format!(
            "{:04}-{:02}-{:02}:{:02}:{:02}:{:02}:{:02}",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            cs
        );
        w.write_str(&s)
    }
}

/// 构建过滤器：`RUST_LOG` 优先，否则使用配置中的级别
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},sqlx=warn", level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化日志 / Initialize tracing subscriber
///
/// `json_format` 为 true 时输出 Bunyan JSON，否则输出紧凑文本。重复调用时静默忽略。
pub fn init_tracing(level: &str, json_format: bool) {
    let filter = build_filter(level);
    if json_format {
        let formatting_layer = BunyanFormattingLayer::new("hotel-listing".into(), std::io::stdout);
        Registry::default()
            .with(filter)
            .with(JsonStorageLayer)
            .with(formatting_layer)
            .try_init()
            .ok();
    } else {
        fmt::SubscriberBuilder::default()
            .with_env_filter(filter)
            .with_timer(LogTimer)
            .compact()
            .with_target(false)
            .try_init()
            .ok();
    }
}
