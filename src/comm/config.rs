use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::info;

/// 配置错误类型
/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("必需的配置文件不存在 / required config file missing: {path}")]
    FileNotFound { path: String },
    #[error("配置格式错误 / config format error: {message}")]
    FormatError { message: String },
    #[error("配置项 '{key}' 不存在 / config key not found")]
    KeyNotFound { key: String },
    #[error("配置项 '{key}' 类型转换失败 / type conversion failed: {message}")]
    TypeConversionError { key: String, message: String },
}

/// 配置数据源信息
#[derive(Debug, Clone)]
pub struct ConfigSourceInfo {
    pub source_type: String,
    pub description: String,
    pub priority: u8,
    pub loaded: bool,
}

/// 配置管理器
/// Configuration manager over layered sources
pub struct ConfigManager {
    config: Config,
    sources_info: Vec<ConfigSourceInfo>,
}

impl ConfigManager {
    /// 使用指定的配置源创建配置管理器（后添加者优先生效）
    /// Build from sources; later sources override earlier ones
    pub fn with_sources(sources: Vec<ConfigSource>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        let mut sources_info = Vec::new();

        for (index, source) in sources.into_iter().enumerate() {
            let info = source.get_source_info(index as u8 + 1);

            if let ConfigSource::File { path, required, .. } = &source {
                let file_exists = std::path::Path::new(path).exists();
                if !file_exists && *required {
                    return Err(ConfigError::FileNotFound { path: path.clone() });
                }
                if !file_exists {
                    // 可选文件不存在，记录但不添加
                    sources_info.push(info);
                    continue;
                }
            }

            builder = source.add_to_builder(builder)?;
            sources_info.push(ConfigSourceInfo {
                loaded: true,
                ..info
            });
        }

        let config = builder.build().map_err(|e| ConfigError::FormatError {
            message: e.to_string(),
        })?;
        Ok(Self {
            config,
            sources_info,
        })
    }

    /// 获取指定 key 的配置值
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.config.get(key).map_err(|e| match e {
            config::ConfigError::NotFound(_) => ConfigError::KeyNotFound {
                key: key.to_string(),
            },
            other => ConfigError::TypeConversionError {
                key: key.to_string(),
                message: other.to_string(),
            },
        })
    }

    /// 获取指定 key 的配置值，如果不存在返回默认值
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// 获取字符串配置值
    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
    }

    /// 检查配置项是否存在
    pub fn exists(&self, key: &str) -> bool {
        self.config.get::<serde_json::Value>(key).is_ok()
    }

    /// 获取配置源统计信息 (total, loaded, skipped)
    pub fn get_sources_stats(&self) -> (usize, usize, usize) {
        let total = self.sources_info.len();
        let loaded = self.sources_info.iter().filter(|info| info.loaded).count();
        (total, loaded, total - loaded)
    }

    /// 打印配置源详细信息
    pub fn print_sources_info(&self) {
        for (index, info) in self.sources_info.iter().enumerate() {
            let status = if info.loaded { "loaded" } else { "skipped" };
            info!(
                priority = info.priority,
                "配置源 {} / config source: {} [{}] {}",
                index + 1,
                info.source_type,
                status,
                info.description
            );
        }
        let (total, loaded, skipped) = self.get_sources_stats();
        info!(total, loaded, skipped, "配置源统计 / config source stats");
    }
}

/// 配置源类型
pub enum ConfigSource {
    /// 文件配置源
    File {
        path: String,
        format: Option<FileFormat>,
        required: bool,
    },
    /// 环境变量配置源，例如 `LISTING_SERVER__PORT=9000` → `server.port`
    Env {
        prefix: String,
        separator: &'static str,
    },
    /// 内存配置源（点分 key → 值）
    Memory(HashMap<String, serde_json::Value>),
    /// 字符串配置源
    String { content: String, format: FileFormat },
}

impl ConfigSource {
    /// 获取配置源信息
    pub fn get_source_info(&self, priority: u8) -> ConfigSourceInfo {
        let (source_type, description) = match self {
            ConfigSource::File {
                path,
                format,
                required,
            } => (
                "File",
                format!(
                    "{} (format: {}, required: {})",
                    path,
                    format.as_ref().map(format_name).unwrap_or("auto"),
                    required
                ),
            ),
            ConfigSource::Env { prefix, separator } => (
                "Environment",
                format!("prefix={}, separator={}", prefix, separator),
            ),
            ConfigSource::Memory(map) => ("Memory", format!("{} keys", map.len())),
            ConfigSource::String { format, .. } => {
                ("String", format!("format: {}", format_name(format)))
            }
        };
        ConfigSourceInfo {
            source_type: source_type.to_string(),
            description,
            priority,
            loaded: false,
        }
    }

    pub fn add_to_builder(
        self,
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        match self {
            ConfigSource::File {
                path,
                format,
                required,
            } => {
                let file_source = match format {
                    Some(format) => File::with_name(&path).format(format),
                    None => File::with_name(&path),
                };
                Ok(builder.add_source(file_source.required(required)))
            }
            ConfigSource::Env { prefix, separator } => Ok(builder.add_source(
                Environment::with_prefix(&prefix)
                    .separator(separator)
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .ignore_empty(true),
            )),
            ConfigSource::Memory(map) => {
                let mut builder = builder;
                for (key, value) in map {
                    builder = builder
                        .set_override(key.as_str(), json_to_config_value(value))
                        .map_err(|e| ConfigError::FormatError {
                            message: e.to_string(),
                        })?;
                }
                Ok(builder)
            }
            ConfigSource::String { content, format } => {
                Ok(builder.add_source(File::from_str(&content, format)))
            }
        }
    }
}

fn format_name(format: &FileFormat) -> &'static str {
    match format {
        FileFormat::Toml => "TOML",
        FileFormat::Yaml => "YAML",
        FileFormat::Json => "JSON",
        FileFormat::Ini => "INI",
        FileFormat::Ron => "RON",
        FileFormat::Json5 => "JSON5",
        _ => "Unknown",
    }
}

fn json_to_config_value(value: serde_json::Value) -> config::Value {
    use config::ValueKind;
    let kind = match value {
        serde_json::Value::Null => ValueKind::Nil,
        serde_json::Value::Bool(b) => ValueKind::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => ValueKind::I64(i),
            None => ValueKind::Float(n.as_f64().unwrap_or_default()),
        },
        serde_json::Value::String(s) => ValueKind::String(s),
        serde_json::Value::Array(items) => {
            ValueKind::Array(items.into_iter().map(json_to_config_value).collect())
        }
        serde_json::Value::Object(map) => ValueKind::Table(
            map.into_iter()
                .map(|(k, v)| (k, json_to_config_value(v)))
                .collect(),
        ),
    };
    config::Value::new(None, kind)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConfigManager, ConfigSource};
    use config::FileFormat;
    use std::collections::HashMap;

    #[test]
    fn test_config_from_string() {
        let source = ConfigSource::String {
            content: "[server]\nport = 8080".to_string(),
            format: FileFormat::Toml,
        };
        let manager = ConfigManager::with_sources(vec![source]).unwrap();
        assert_eq!(manager.get::<i64>("server.port").unwrap(), 8080);
    }

    #[test]
    fn test_config_from_memory() {
        let mut map = HashMap::new();
        map.insert(
            "server.host".to_string(),
            serde_json::Value::String("127.0.0.1".to_string()),
        );
        let manager = ConfigManager::with_sources(vec![ConfigSource::Memory(map)]).unwrap();
        assert_eq!(manager.get::<String>("server.host").unwrap(), "127.0.0.1");
        assert!(manager.exists("server.host"));
    }

    #[test]
    fn test_later_source_wins() {
        let base = ConfigSource::String {
            content: "[server]\nport = 8080\nhost = \"0.0.0.0\"".to_string(),
            format: FileFormat::Toml,
        };
        let overlay = ConfigSource::String {
            content: "[server]\nport = 9090".to_string(),
            format: FileFormat::Toml,
        };
        let manager = ConfigManager::with_sources(vec![base, overlay]).unwrap();
        assert_eq!(manager.get::<u16>("server.port").unwrap(), 9090);
        assert_eq!(manager.get_string("server.host").unwrap(), "0.0.0.0");
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let source = ConfigSource::File {
            path: "config/does-not-exist.toml".to_string(),
            format: Some(FileFormat::Toml),
            required: false,
        };
        let manager = ConfigManager::with_sources(vec![source]).unwrap();
        assert_eq!(manager.get_sources_stats(), (1, 0, 1));
        assert!(matches!(
            manager.get::<String>("server.host"),
            Err(ConfigError::KeyNotFound { .. })
        ));
        assert_eq!(manager.get_or("server.port", 8080u16), 8080);
    }

    #[test]
    fn test_missing_required_file_fails() {
        let source = ConfigSource::File {
            path: "config/does-not-exist.toml".to_string(),
            format: Some(FileFormat::Toml),
            required: true,
        };
        assert!(matches!(
            ConfigManager::with_sources(vec![source]),
            Err(ConfigError::FileNotFound { .. })
        ));
    }
}
