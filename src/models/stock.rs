//! 股票数据模型
//!
//! 定义历史收盘价、最新报价和分析结果的数据结构

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::zones::{Zone, ZoneSignal};

/// 单个交易日的收盘价
///
/// 不可变；同一序列中日期严格递增，收盘价恒为正数
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// 交易日期（ISO 8601，YYYY-MM-DD）
    pub date: NaiveDate,
    /// 收盘价
    pub close: f64,
}

/// 最新成交价
///
/// price 为 None 表示所有回退路径都无法确定价格，属于合法的终态
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LatestQuote {
    /// 股票代码
    pub symbol: String,
    /// 最新价格（可能缺失）
    pub price: Option<f64>,
}

/// 数据来源标记
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// 实时数据
    Live,
    /// 模拟数据（回退路径）
    Synthetic,
}

/// 自选股条目
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StockOption {
    /// 股票代码
    pub symbol: String,
    /// 公司名称
    pub name: String,
    /// 所属行业（可选）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

/// 股票查询参数
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    /// 股票代码
    pub symbol: Option<String>,
}

/// 分析接口查询参数
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// 股票代码
    pub symbol: Option<String>,
    /// 短周期均线窗口（默认 20）
    pub sma: Option<usize>,
    /// 长周期均线窗口（默认 50）
    pub sma2: Option<usize>,
}

/// 一次完整分析的输出：序列、均线、涨跌幅与买卖区间状态
#[derive(Debug, Serialize)]
pub struct StockAnalysis {
    /// 股票代码
    pub symbol: String,
    /// 历史收盘价序列（日期升序）
    pub series: Vec<PricePoint>,
    /// 短周期 SMA，与 series 等长，窗口未满处为 null
    pub sma_short: Vec<Option<f64>>,
    /// 长周期 SMA
    pub sma_long: Vec<Option<f64>>,
    /// 短周期均线窗口
    pub sma_short_window: usize,
    /// 长周期均线窗口
    pub sma_long_window: usize,
    /// 最新价格
    pub latest_price: Option<f64>,
    /// 前一收盘价（序列最后一个点）
    pub previous_close: Option<f64>,
    /// 涨跌幅（百分比；前收为 0 或缺失时为 null）
    pub percent_change: Option<f64>,
    /// 买入区间
    pub buy_zone: Zone,
    /// 卖出区间
    pub sell_zone: Zone,
    /// 区间信号
    pub signal: ZoneSignal,
    /// 距买入区间下沿的差值（价格在区间下方时有值）
    pub distance_to_buy: Option<f64>,
    /// 距卖出区间下沿的差值
    pub distance_to_sell: Option<f64>,
    /// 数据来源
    pub source: DataSource,
    /// 更新时间（UTC，ISO 8601）
    pub updated_at: String,
}
