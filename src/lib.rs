//! Trading Zones 股票数据后端
//!
//! 为行情仪表盘提供历史收盘价、实时报价、均线与买卖区间分析。
//! 数据来源：Yahoo Finance；实时数据不可用时可按配置回退到模拟数据。

pub mod config; // 配置加载
pub mod errors; // 错误分类
pub mod handlers; // HTTP 请求处理器
pub mod indicators; // 技术指标计算
pub mod models; // 数据模型定义
pub mod services; // 业务逻辑服务
