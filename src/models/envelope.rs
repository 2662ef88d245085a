use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// 统一列表响应信封：`count` 恒等于 `data.len()`，`error` 仅在失败时出现
/// Uniform listing envelope: `count == data.len()`, `error` only on failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// 成功信封
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            error: None,
        }
    }

    /// 失败信封，`data` 保持为空数组
    pub fn failure<M: Into<String>>(message: M) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            count: 0,
            error: Some(message.into()),
        }
    }

    /// 解包：失败信封转为错误信息
    /// Unwrap into rows, or the server-provided error message
    pub fn into_data(self) -> Result<Vec<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "request failed".to_string()))
        }
    }
}

// 兼容其他实现返回 `"data": null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
