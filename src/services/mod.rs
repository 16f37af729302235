//! 业务逻辑服务模块
//!
//! 封装数据获取、回退与编排逻辑

pub mod fetch_client; // 限速 + 重试 + 校验门
pub mod mock_data; // 模拟数据生成
pub mod provider; // 数据源适配器
pub mod stock_service; // 编排服务
