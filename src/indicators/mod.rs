//! 技术指标计算
//!
//! 纯函数，无 I/O：简单移动平均、涨跌幅、买卖区间判定

pub mod sma;
pub mod zones;

pub use sma::sma;
pub use zones::{classify, derive_zones, Zone, ZoneAssessment, ZoneSignal};

/// 计算涨跌幅（百分比）
///
/// `(latest - previous) / previous * 100`；
/// previous 为 0 或任一输入非有限数时返回 None
pub fn percent_change(latest: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !latest.is_finite() || !previous.is_finite() {
        return None;
    }
    Some((latest - previous) / previous * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn percent_change_of_equal_prices_is_zero() {
        assert_eq!(percent_change(182.0, 182.0), Some(0.0));
    }

    #[test]
    fn percent_change_against_zero_is_undefined() {
        assert_eq!(percent_change(100.0, 0.0), None);
    }

    #[test]
    fn percent_change_rejects_non_finite_inputs() {
        assert_eq!(percent_change(f64::NAN, 100.0), None);
        assert_eq!(percent_change(100.0, f64::INFINITY), None);
    }

    #[test]
    fn percent_change_matches_reference_scenario() {
        // AAPL 两点场景: 180 -> 182
        let change = percent_change(182.0, 180.0).unwrap();
        assert_relative_eq!(change, 1.1111, epsilon = 1e-3);
    }

    #[test]
    fn percent_change_is_signed() {
        let down = percent_change(90.0, 100.0).unwrap();
        assert_relative_eq!(down, -10.0, epsilon = 1e-12);
    }
}
