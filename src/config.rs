//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，所有字段均有默认值

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::StockOption;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Yahoo Finance 接口根地址
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 历史数据回看窗口（天），默认约六个月
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
}

/// 回退策略
///
/// 两种策略只能全局选一种，不允许按代码路径混用：
/// - `Synthetic`：实时数据不可用时静默替换为模拟数据（开发/演示环境）
/// - `Error`：终态错误原样上抛，不做任何替换（正确性优先）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    Synthetic,
    Error,
}

/// 抓取客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 最小请求间隔（毫秒），对所有请求全局生效
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
    /// 最大尝试次数（含首次请求）
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// 重试间隔（毫秒），固定退避
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// 回退策略
    #[serde(default = "default_fallback")]
    pub fallback: FallbackPolicy,
}

/// 买卖区间模式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZoneMode {
    /// 固定区间（预配置常量）
    Fixed,
    /// 按当前序列的最高/最低价动态推导
    Dynamic,
}

/// 买卖区间配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesConfig {
    /// 区间模式
    #[serde(default = "default_zone_mode")]
    pub mode: ZoneMode,
    /// 固定买入区间下沿
    #[serde(default = "default_buy_zone_min")]
    pub buy_min: f64,
    /// 固定买入区间上沿
    #[serde(default = "default_buy_zone_max")]
    pub buy_max: f64,
    /// 固定卖出区间下沿
    #[serde(default = "default_sell_zone_min")]
    pub sell_min: f64,
    /// 固定卖出区间上沿
    #[serde(default = "default_sell_zone_max")]
    pub sell_max: f64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据源配置
    #[serde(default)]
    pub provider: ProviderConfig,
    /// 抓取客户端配置
    #[serde(default)]
    pub client: ClientConfig,
    /// 买卖区间配置
    #[serde(default)]
    pub zones: ZonesConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
    /// 自选股列表
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<StockOption>,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3001 }
fn default_provider_base_url() -> String { "https://query1.finance.yahoo.com".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_lookback_days() -> i64 { 180 }
fn default_rate_limit_ms() -> u64 { 1000 }
fn default_retry_attempts() -> u32 { 3 }
fn default_retry_delay_ms() -> u64 { 2000 }
fn default_fallback() -> FallbackPolicy { FallbackPolicy::Synthetic }
fn default_zone_mode() -> ZoneMode { ZoneMode::Fixed }
fn default_buy_zone_min() -> f64 { 130.0 }
fn default_buy_zone_max() -> f64 { 140.0 }
fn default_sell_zone_min() -> f64 { 170.0 }
fn default_sell_zone_max() -> f64 { 185.0 }
fn default_log_level() -> String { "info".to_string() }

fn default_watchlist() -> Vec<StockOption> {
    let stocks = [
        ("SNOW", "Snowflake Inc.", "Technology"),
        ("AAPL", "Apple Inc.", "Technology"),
        ("MSFT", "Microsoft Corporation", "Technology"),
        ("GOOGL", "Alphabet Inc.", "Technology"),
        ("AMZN", "Amazon.com Inc.", "Consumer Cyclical"),
        ("TSLA", "Tesla Inc.", "Automotive"),
        ("META", "Meta Platforms Inc.", "Technology"),
        ("NVDA", "NVIDIA Corporation", "Technology"),
        ("JPM", "JPMorgan Chase & Co.", "Financial Services"),
        ("V", "Visa Inc.", "Financial Services"),
    ];
    stocks
        .iter()
        .map(|(symbol, name, sector)| StockOption {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: Some(sector.to_string()),
        })
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            timeout_secs: default_timeout(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rate_limit_ms: default_rate_limit_ms(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            fallback: default_fallback(),
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            mode: default_zone_mode(),
            buy_min: default_buy_zone_min(),
            buy_max: default_buy_zone_max(),
            sell_min: default_sell_zone_min(),
            sell_max: default_sell_zone_max(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            provider: ProviderConfig::default(),
            client: ClientConfig::default(),
            zones: ZonesConfig::default(),
            log: LogConfig::default(),
            watchlist: default_watchlist(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    pub fn load() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.client.rate_limit_ms, 1000);
        assert_eq!(config.client.retry_attempts, 3);
        assert_eq!(config.client.retry_delay_ms, 2000);
        assert_eq!(config.client.fallback, FallbackPolicy::Synthetic);
        assert_eq!(config.zones.mode, ZoneMode::Fixed);
        assert_eq!(config.zones.buy_min, 130.0);
        assert_eq!(config.zones.sell_max, 185.0);
        assert_eq!(config.watchlist.len(), 10);
    }

    #[test]
    fn partial_json_uses_field_defaults() {
        let json = r#"{ "client": { "retry_attempts": 5, "fallback": "error" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.client.retry_attempts, 5);
        assert_eq!(config.client.fallback, FallbackPolicy::Error);
        // 未给出的字段走默认值
        assert_eq!(config.client.rate_limit_ms, 1000);
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn zone_mode_parses_lowercase() {
        let json = r#"{ "zones": { "mode": "dynamic" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.zones.mode, ZoneMode::Dynamic);
    }
}
