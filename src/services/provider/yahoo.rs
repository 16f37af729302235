//! Yahoo Finance 数据源适配
//!
//! 对接 v8 chart 接口，拉取历史日线收盘价和最新成交价，
//! 归一化为 PricePoint / LatestQuote

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::errors::StockError;
use crate::models::{LatestQuote, PricePoint};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 抓取历史日线收盘价
///
/// 对接 {base}/v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d，
/// 窗口为今天往前 lookback_days 天。
/// 空响应报 `NoDataAvailable`，网络故障与非 2xx 报 `Provider`（可重试）。
pub async fn fetch_historical(
    http: &Client,
    cfg: &ProviderConfig,
    symbol: &str,
) -> Result<Vec<PricePoint>, StockError> {
    let end = Utc::now();
    let start = end - Duration::days(cfg.lookback_days);

    let url = format!(
        "{}/v8/finance/chart/{}",
        cfg.base_url.trim_end_matches('/'),
        symbol
    );

    let response = http
        .get(&url)
        .query(&[
            ("period1", start.timestamp().to_string()),
            ("period2", end.timestamp().to_string()),
            ("interval", "1d".to_string()),
        ])
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .map_err(|e| StockError::Provider(anyhow!(e)))?;

    if !response.status().is_success() {
        return Err(StockError::Provider(anyhow!(
            "数据源返回状态码 {}",
            response.status()
        )));
    }

    let json: Value = response
        .json()
        .await
        .map_err(|e| StockError::Provider(anyhow!(e)))?;

    parse_chart_response(&json)
}

/// 解析 chart 接口响应
///
/// 结构: chart.result[0].timestamp[] 与 chart.result[0].indicators.quote[0].close[]
pub fn parse_chart_response(json: &Value) -> Result<Vec<PricePoint>, StockError> {
    let result = &json["chart"]["result"][0];
    if result.is_null() {
        return Err(StockError::NoDataAvailable);
    }

    let timestamps = result["timestamp"]
        .as_array()
        .ok_or(StockError::NoDataAvailable)?;
    let closes = result["indicators"]["quote"][0]["close"]
        .as_array()
        .ok_or(StockError::NoDataAvailable)?;

    let mut series: Vec<PricePoint> = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.iter().zip(closes) {
        // 停牌日的收盘价为 null，跳过
        let (Some(ts), Some(close)) = (ts.as_i64(), close.as_f64()) else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };

        // 当天的盘中时间戳与日线条目会映射到同一天，保留较新的价格
        match series.last_mut() {
            Some(last) if last.date == date => last.close = close,
            _ => series.push(PricePoint { date, close }),
        }
    }

    if series.is_empty() {
        return Err(StockError::NoDataAvailable);
    }
    Ok(series)
}

/// 抓取最新成交价
///
/// 对接 {base}/v8/finance/chart/{symbol}?interval=1d&range=1d，
/// 读取 chart.result[0].meta.regularMarketPrice；
/// 字段缺失报 `QuoteUnavailable`。
pub async fn fetch_latest_quote(
    http: &Client,
    cfg: &ProviderConfig,
    symbol: &str,
) -> Result<LatestQuote, StockError> {
    let url = format!(
        "{}/v8/finance/chart/{}",
        cfg.base_url.trim_end_matches('/'),
        symbol
    );

    let response = http
        .get(&url)
        .query(&[("interval", "1d"), ("range", "1d")])
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .map_err(|e| StockError::Provider(anyhow!(e)))?;

    if !response.status().is_success() {
        return Err(StockError::Provider(anyhow!(
            "数据源返回状态码 {}",
            response.status()
        )));
    }

    let json: Value = response
        .json()
        .await
        .map_err(|e| StockError::Provider(anyhow!(e)))?;

    parse_quote_response(&json, symbol)
}

/// 解析最新价格
pub fn parse_quote_response(json: &Value, symbol: &str) -> Result<LatestQuote, StockError> {
    let price = json["chart"]["result"][0]["meta"]["regularMarketPrice"].as_f64();

    match price {
        Some(p) if p > 0.0 => Ok(LatestQuote {
            symbol: symbol.to_uppercase(),
            price: Some(p),
        }),
        _ => Err(StockError::QuoteUnavailable(symbol.to_string())),
    }
}
