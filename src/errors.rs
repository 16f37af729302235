//! 错误类型定义
//!
//! 数据获取管线的错误分类：
//! - `InvalidInput`：请求参数非法，在入口处直接拒绝，不发起网络请求
//! - `NoDataAvailable`：数据源返回空结果
//! - `QuoteUnavailable`：实时行情缺少价格字段
//! - `Provider`：网络或数据源的瞬时故障，可重试
//! - `FetchFailed`：重试次数耗尽后的终态错误
//! - `ValidationFailed`：序列未通过结构校验（日期乱序、价格非正等）

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockError {
    /// 请求参数非法
    #[error("请求参数非法: {0}")]
    InvalidInput(String),

    /// 数据源返回空结果
    #[error("数据源未返回任何数据")]
    NoDataAvailable,

    /// 实时行情缺少价格字段
    #[error("无法获取 {0} 的最新价格")]
    QuoteUnavailable(String),

    /// 瞬时故障（网络错误、非 2xx 响应、数据源抛错），可重试
    #[error("数据源请求失败: {0}")]
    Provider(#[from] anyhow::Error),

    /// 重试耗尽后的终态错误
    #[error("获取 {symbol} 数据失败（已尝试 {attempts} 次）: {message}")]
    FetchFailed {
        symbol: String,
        attempts: u32,
        message: String,
    },

    /// 序列结构校验失败
    #[error("序列校验失败: {0}")]
    ValidationFailed(String),
}

impl StockError {
    /// 是否属于可重试的瞬时故障
    pub fn is_retryable(&self) -> bool {
        matches!(self, StockError::Provider(_))
    }

    /// 是否允许按配置回退到模拟数据
    ///
    /// `InvalidInput` 永远不回退；瞬时故障在重试阶段处理，
    /// 走到这里时已转化为 `FetchFailed`
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(
            self,
            StockError::NoDataAvailable
                | StockError::QuoteUnavailable(_)
                | StockError::FetchFailed { .. }
                | StockError::ValidationFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_is_retryable() {
        let err = StockError::Provider(anyhow::anyhow!("connection refused"));
        assert!(err.is_retryable());
        assert!(!err.is_fallback_eligible());
    }

    #[test]
    fn invalid_input_never_falls_back() {
        let err = StockError::InvalidInput("symbol 缺失".into());
        assert!(!err.is_retryable());
        assert!(!err.is_fallback_eligible());
    }

    #[test]
    fn terminal_errors_are_fallback_eligible() {
        assert!(StockError::NoDataAvailable.is_fallback_eligible());
        assert!(StockError::ValidationFailed("乱序".into()).is_fallback_eligible());
        assert!(StockError::FetchFailed {
            symbol: "AAPL".into(),
            attempts: 3,
            message: "timeout".into(),
        }
        .is_fallback_eligible());
    }
}
