//! 买卖区间判定
//!
//! 区间为闭区间 `[lower, upper]`。价格落在买入区间报 `InBuyZone`，
//! 落在卖出区间报 `InSellZone`，否则报 `Neither` 并给出
//! 距各区间下沿的差值（仅当价格在区间下方时有值，已越过区间则缺失）。

use serde::{Deserialize, Serialize};

/// 价格区间
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Zone {
    /// 下沿
    pub lower: f64,
    /// 上沿
    pub upper: f64,
}

impl Zone {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// 价格是否落在区间内（闭区间）
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && price <= self.upper
    }

    /// 距下沿的差值；价格已达到或越过下沿时为 None
    pub fn distance_below(&self, price: f64) -> Option<f64> {
        if price < self.lower {
            Some(self.lower - price)
        } else {
            None
        }
    }
}

/// 区间信号
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneSignal {
    InBuyZone,
    InSellZone,
    Neither,
}

/// 一次区间判定的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneAssessment {
    pub signal: ZoneSignal,
    /// 距买入区间下沿的差值（价格在区间下方时有值）
    pub distance_to_buy: Option<f64>,
    /// 距卖出区间下沿的差值
    pub distance_to_sell: Option<f64>,
}

/// 判定价格相对买入/卖出区间的位置
///
/// 买入区间优先：两个区间重叠时以买入信号为准
pub fn classify(price: f64, buy: &Zone, sell: &Zone) -> ZoneAssessment {
    let signal = if buy.contains(price) {
        ZoneSignal::InBuyZone
    } else if sell.contains(price) {
        ZoneSignal::InSellZone
    } else {
        ZoneSignal::Neither
    };

    ZoneAssessment {
        signal,
        distance_to_buy: if signal == ZoneSignal::InBuyZone {
            None
        } else {
            buy.distance_below(price)
        },
        distance_to_sell: if signal == ZoneSignal::InSellZone {
            None
        } else {
            sell.distance_below(price)
        },
    }
}

/// 按当前序列动态推导买卖区间
///
/// minPrice = min(closes) * 0.95, maxPrice = max(closes) * 1.05,
/// range = maxPrice - minPrice；
/// 买入区间 [min+0.05r, min+0.25r]，卖出区间 [min+0.75r, max-0.05r]。
/// 序列为空时返回 None。
pub fn derive_zones(closes: &[f64]) -> Option<(Zone, Zone)> {
    if closes.is_empty() {
        return None;
    }

    let min_close = closes.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_close = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let min_price = min_close * 0.95;
    let max_price = max_close * 1.05;
    let range = max_price - min_price;

    let buy = Zone::new(min_price + 0.05 * range, min_price + 0.25 * range);
    let sell = Zone::new(min_price + 0.75 * range, max_price - 0.05 * range);
    Some((buy, sell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fixed_zones() -> (Zone, Zone) {
        (Zone::new(130.0, 140.0), Zone::new(170.0, 185.0))
    }

    #[test]
    fn price_inside_buy_zone() {
        let (buy, sell) = fixed_zones();
        let result = classify(135.0, &buy, &sell);
        assert_eq!(result.signal, ZoneSignal::InBuyZone);
        assert_eq!(result.distance_to_buy, None);
        // 135 仍在卖出区间下方
        assert_relative_eq!(result.distance_to_sell.unwrap(), 35.0);
    }

    #[test]
    fn price_between_zones() {
        let (buy, sell) = fixed_zones();
        let result = classify(150.0, &buy, &sell);
        assert_eq!(result.signal, ZoneSignal::Neither);
        // 已越过买入区间，距离缺失
        assert_eq!(result.distance_to_buy, None);
        assert_relative_eq!(result.distance_to_sell.unwrap(), 20.0);
    }

    #[test]
    fn price_below_both_zones() {
        let (buy, sell) = fixed_zones();
        let result = classify(100.0, &buy, &sell);
        assert_eq!(result.signal, ZoneSignal::Neither);
        assert_relative_eq!(result.distance_to_buy.unwrap(), 30.0);
        assert_relative_eq!(result.distance_to_sell.unwrap(), 70.0);
    }

    #[test]
    fn price_inside_sell_zone() {
        let (buy, sell) = fixed_zones();
        let result = classify(178.0, &buy, &sell);
        assert_eq!(result.signal, ZoneSignal::InSellZone);
        assert_eq!(result.distance_to_sell, None);
    }

    #[test]
    fn zone_bounds_are_inclusive() {
        let (buy, sell) = fixed_zones();
        assert_eq!(classify(130.0, &buy, &sell).signal, ZoneSignal::InBuyZone);
        assert_eq!(classify(140.0, &buy, &sell).signal, ZoneSignal::InBuyZone);
        assert_eq!(classify(185.0, &buy, &sell).signal, ZoneSignal::InSellZone);
    }

    #[test]
    fn derived_zones_follow_min_max_formula() {
        let closes = [100.0, 150.0, 200.0];
        let (buy, sell) = derive_zones(&closes).unwrap();

        let min_price = 100.0 * 0.95;
        let max_price = 200.0 * 1.05;
        let range = max_price - min_price;

        assert_relative_eq!(buy.lower, min_price + 0.05 * range);
        assert_relative_eq!(buy.upper, min_price + 0.25 * range);
        assert_relative_eq!(sell.lower, min_price + 0.75 * range);
        assert_relative_eq!(sell.upper, max_price - 0.05 * range);
        // 推导出的买入区间恒低于卖出区间
        assert!(buy.upper < sell.lower);
    }

    #[test]
    fn derive_zones_empty_series_is_none() {
        assert_eq!(derive_zones(&[]), None);
    }
}
