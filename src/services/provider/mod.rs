//! 数据源适配器模块
//!
//! 将外部行情接口归一化为内部数据模型

pub mod yahoo;
