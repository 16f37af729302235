//! 错误响应模型
//!
//! `/api/stock` 代理接口的错误格式固定为 `{ "error": "..." }`，
//! 错误文案与前端约定一致，不能随意改动

use serde::{Deserialize, Serialize};

/// 缺少 symbol 参数（400）
pub const ERR_SYMBOL_REQUIRED: &str = "Symbol parameter is required";
/// 数据源返回空序列（404）
pub const ERR_NO_DATA: &str = "No data found for the specified symbol";
/// 其他数据源故障（500）
pub const ERR_FETCH_FAILED: &str = "Failed to fetch stock data";

/// 统一错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 错误信息
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
