//! 模拟数据生成
//!
//! 实时数据不可用时的回退数据源：按股票代码查基准价格，
//! 叠加正弦趋势、线性漂移（方向每次生成只随机一次）和有界噪声，
//! 生成覆盖整个回看窗口的日线序列。
//! 生成结果必须满足历史序列的全部不变量（日期严格递增、收盘价为正）。

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

use crate::models::PricePoint;

/// 回看窗口（天）；生成的序列共 181 个点（今天往前 180 天至今天）
pub const MOCK_WINDOW_DAYS: i64 = 180;

/// 各股票的基准价格；未知代码默认 100
pub fn base_price(symbol: &str) -> f64 {
    match symbol {
        "SNOW" => 155.0,
        "AAPL" => 180.0,
        "MSFT" => 410.0,
        "GOOGL" => 170.0,
        "AMZN" => 185.0,
        "TSLA" => 220.0,
        "META" => 470.0,
        "NVDA" => 890.0,
        "JPM" => 190.0,
        "V" => 280.0,
        _ => 100.0,
    }
}

/// 波动系数：历史波动大的标的取 2.0，其余 1.0
fn volatility_factor(symbol: &str) -> f64 {
    match symbol {
        "TSLA" | "NVDA" => 2.0,
        _ => 1.0,
    }
}

/// 以今天为终点生成模拟序列
pub fn generate_series(symbol: &str) -> Vec<PricePoint> {
    generate_series_ending(symbol, Utc::now().date_naive())
}

/// 以指定日期为终点生成模拟序列
pub fn generate_series_ending(symbol: &str, end_date: NaiveDate) -> Vec<PricePoint> {
    let mut rng = rand::thread_rng();
    let base = base_price(symbol);
    let volatility = volatility_factor(symbol);

    // 漂移方向整段序列只随机一次，偶尔生成下行行情
    let drift_sign = if rng.gen::<f64>() > 0.3 { 1.0 } else { -1.0 };

    let mut series = Vec::with_capacity(MOCK_WINDOW_DAYS as usize + 1);
    for days_ago in (0..=MOCK_WINDOW_DAYS).rev() {
        let date = end_date - Duration::days(days_ago);

        let trend = (days_ago as f64 / 30.0).sin() * 15.0;
        let drift = (days_ago as f64 / 10.0) * drift_sign;
        let noise = (rng.gen::<f64>() - 0.5) * 3.0 * volatility;

        // 收盘价不低于基准价的一半，避免出现非正价格
        let close = (base + trend + drift + noise).max(base * 0.5);
        let close = (close * 100.0).round() / 100.0;

        series.push(PricePoint { date, close });
    }

    series
}

/// 模拟序列的最后一个收盘价，用于顶替缺失的实时报价
pub fn latest_mock_price(symbol: &str) -> Option<f64> {
    generate_series(symbol).last().map(|p| p.close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_has_181_points_over_trailing_window() {
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let series = generate_series_ending("AAPL", end);
        assert_eq!(series.len(), 181);
        assert_eq!(series.first().unwrap().date, end - Duration::days(180));
        assert_eq!(series.last().unwrap().date, end);
    }

    #[test]
    fn dates_are_strictly_ascending() {
        let series = generate_series("MSFT");
        for pair in series.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn closes_are_clamped_to_half_base_price() {
        // 多跑几轮覆盖随机噪声
        for _ in 0..20 {
            let series = generate_series("TSLA");
            for point in &series {
                assert!(point.close >= 220.0 * 0.5);
            }
        }
    }

    #[test]
    fn unknown_symbol_defaults_to_base_100() {
        assert_eq!(base_price("UNKNOWN"), 100.0);
        let series = generate_series("UNKNOWN");
        for point in &series {
            assert!(point.close >= 50.0);
        }
    }

    #[test]
    fn latest_mock_price_is_last_close() {
        let price = latest_mock_price("SNOW").unwrap();
        assert!(price >= 155.0 * 0.5);
    }
}
