use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("配置错误: {0}")]
    Config(String),
    #[error("SQLx 错误: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("存储不可用: {0}")]
    Unavailable(String),
}

impl DbError {
    /// 存储层原始错误文本（不带中文前缀），用于返回给客户端
    /// Raw store error text, as produced by the driver
    pub fn store_message(&self) -> String {
        match self {
            DbError::Config(msg) | DbError::Unavailable(msg) => msg.clone(),
            DbError::Sqlx(err) => err.to_string(),
        }
    }
}

/// 获取详细错误描述（中英文） / Get detailed error description (CN/EN)
pub fn describe_error(e: &DbError) -> String {
    match e {
        DbError::Config(msg) => format!("配置错误 / Config error: {}", msg),
        DbError::Sqlx(err) => format!("SQLx 错误 / SQLx error: {}", err),
        DbError::Unavailable(msg) => format!("存储不可用 / Store unavailable: {}", msg),
    }
}
