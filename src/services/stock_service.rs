//! 股票数据服务
//!
//! 编排抓取客户端、回退策略、指标计算和买卖区间判定。
//! 回退策略全局只选一种（配置项 client.fallback），
//! 不允许按代码路径混用，避免错误与回退行为不确定地交替出现。

use chrono::Utc;

use crate::config::{AppConfig, FallbackPolicy, ZoneMode, ZonesConfig};
use crate::errors::StockError;
use crate::indicators::{self, classify, derive_zones, Zone, ZoneSignal};
use crate::models::{DataSource, LatestQuote, PricePoint, StockAnalysis};
use crate::services::fetch_client::{validate_series, FetchClient};
use crate::services::mock_data;

/// 获取历史序列，按配置回退到模拟数据
pub async fn get_history(
    client: &FetchClient,
    config: &AppConfig,
    symbol: &str,
) -> Result<(Vec<PricePoint>, DataSource), StockError> {
    match client.fetch_historical(symbol).await {
        Ok(series) => Ok((series, DataSource::Live)),
        Err(e)
            if config.client.fallback == FallbackPolicy::Synthetic
                && e.is_fallback_eligible() =>
        {
            log::warn!("{} 实时历史数据不可用（{}），回退到模拟数据", symbol, e);
            let series = mock_data::generate_series(symbol);
            // 模拟序列同样要过校验门
            validate_series(&series)?;
            Ok((series, DataSource::Synthetic))
        }
        Err(e) => Err(e),
    }
}

/// 获取最新报价，按配置回退到模拟序列的最后一个收盘价
pub async fn get_latest_quote(
    client: &FetchClient,
    config: &AppConfig,
    symbol: &str,
) -> Result<(LatestQuote, DataSource), StockError> {
    match client.fetch_latest_quote(symbol).await {
        Ok(quote) => Ok((quote, DataSource::Live)),
        Err(e)
            if config.client.fallback == FallbackPolicy::Synthetic
                && e.is_fallback_eligible() =>
        {
            log::warn!("{} 实时报价不可用（{}），回退到模拟价格", symbol, e);
            Ok((
                LatestQuote {
                    symbol: symbol.to_uppercase(),
                    price: mock_data::latest_mock_price(symbol),
                },
                DataSource::Synthetic,
            ))
        }
        Err(e) => Err(e),
    }
}

/// 按配置解析买卖区间
///
/// 动态模式按当前序列推导，序列为空时退回固定区间
/// （正常流程不会走到：序列先过校验门，非空）
pub fn resolve_zones(cfg: &ZonesConfig, closes: &[f64]) -> (Zone, Zone) {
    let fixed = (
        Zone::new(cfg.buy_min, cfg.buy_max),
        Zone::new(cfg.sell_min, cfg.sell_max),
    );

    match cfg.mode {
        ZoneMode::Fixed => fixed,
        ZoneMode::Dynamic => derive_zones(closes).unwrap_or(fixed),
    }
}

/// 完整分析：历史序列 + 均线 + 涨跌幅 + 买卖区间状态
pub async fn get_analysis(
    client: &FetchClient,
    config: &AppConfig,
    symbol: &str,
    sma_short_window: usize,
    sma_long_window: usize,
) -> Result<StockAnalysis, StockError> {
    let (series, series_source) = get_history(client, config, symbol).await?;
    let closes: Vec<f64> = series.iter().map(|p| p.close).collect();
    let previous_close = closes.last().copied();

    let (quote, quote_source) = get_latest_quote(client, config, symbol).await?;
    let source = if series_source == DataSource::Synthetic
        || quote_source == DataSource::Synthetic
    {
        DataSource::Synthetic
    } else {
        DataSource::Live
    };

    let sma_short = indicators::sma(&closes, sma_short_window);
    let sma_long = indicators::sma(&closes, sma_long_window);

    let percent_change = match (quote.price, previous_close) {
        (Some(latest), Some(previous)) => indicators::percent_change(latest, previous),
        _ => None,
    };

    let (buy_zone, sell_zone) = resolve_zones(&config.zones, &closes);
    let assessment = quote.price.map(|p| classify(p, &buy_zone, &sell_zone));

    Ok(StockAnalysis {
        symbol: symbol.to_uppercase(),
        series,
        sma_short,
        sma_long,
        sma_short_window,
        sma_long_window,
        latest_price: quote.price,
        previous_close,
        percent_change,
        buy_zone,
        sell_zone,
        signal: assessment.map_or(ZoneSignal::Neither, |a| a.signal),
        distance_to_buy: assessment.and_then(|a| a.distance_to_buy),
        distance_to_sell: assessment.and_then(|a| a.distance_to_sell),
        source,
        updated_at: Utc::now().to_rfc3339(),
    })
}
