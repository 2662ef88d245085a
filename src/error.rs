use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::comm::config::ConfigError;
use crate::models::Envelope;

/// 统一的应用错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("验证错误: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("数据库错误: {message}")]
    Database { message: String },

    #[error("内部错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 创建验证错误
    pub fn validation<T: Into<String>, U: Into<String>>(field: T, message: U) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 创建数据库错误
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// 写入响应信封 `error` 字段的文本；数据库错误不带前缀，保持存储层原文
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Database { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation { .. } => {
                tracing::info!("Client error: {}", self);
            }
            _ => {
                tracing::error!("Internal error: {}", self);
            }
        }

        HttpResponse::build(self.status_code())
            .json(Envelope::<serde_json::Value>::failure(self.client_message()))
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_database_error_renders_failure_envelope() {
        let err = AppError::database("relation \"cities\" does not exist");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["count"], 0);
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["error"], "relation \"cities\" does not exist");
    }

    #[test]
    fn test_validation_status() {
        let err = AppError::validation("server_port", "out of range");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "验证错误: server_port: out of range");
    }
}
