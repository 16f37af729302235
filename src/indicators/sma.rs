//! 简单移动平均
//!
//! SMA(n)[i] = mean(close[i-n+1..=i])，窗口未满处为 None。
//! 输出与输入等长；窗口大于序列长度时输出全为 None，而不是报错。

/// 计算简单移动平均，滑动窗口 O(n)
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);

    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out[i] = Some(sum / window as f64);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn sma_warmup_is_none() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let result = sma(&values, 3);
        assert_eq!(result.len(), 5);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!(result[2].is_some());
    }

    #[test]
    fn sma_values_are_trailing_means() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let result = sma(&values, 3);
        assert_relative_eq!(result[2].unwrap(), 20.0);
        assert_relative_eq!(result[3].unwrap(), 30.0);
        assert_relative_eq!(result[4].unwrap(), 40.0);
    }

    #[test]
    fn sma_window_one_echoes_input() {
        let values = [180.0, 182.0, 181.5];
        let result = sma(&values, 1);
        for (v, r) in values.iter().zip(&result) {
            assert_relative_eq!(r.unwrap(), *v);
        }
    }

    #[test]
    fn sma_window_larger_than_series_is_all_none() {
        let values = [10.0, 20.0];
        let result = sma(&values, 50);
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn sma_window_zero_is_all_none() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(sma(&values, 0), vec![None; 3]);
    }

    #[test]
    fn sma_empty_series() {
        assert!(sma(&[], 20).is_empty());
    }

    proptest! {
        #[test]
        fn sma_is_length_preserving(
            values in proptest::collection::vec(1.0f64..1000.0, 0..200),
            window in 1usize..60,
        ) {
            let result = sma(&values, window);
            prop_assert_eq!(result.len(), values.len());
        }

        #[test]
        fn sma_matches_naive_mean(
            values in proptest::collection::vec(1.0f64..1000.0, 1..120),
            window in 1usize..40,
        ) {
            let result = sma(&values, window);
            for (i, slot) in result.iter().enumerate() {
                if i + 1 < window {
                    prop_assert!(slot.is_none());
                } else {
                    let naive: f64 =
                        values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                    let got = slot.unwrap();
                    prop_assert!((got - naive).abs() < 1e-6 * naive.abs().max(1.0));
                }
            }
        }
    }
}
