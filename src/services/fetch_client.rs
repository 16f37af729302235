//! 抓取客户端
//!
//! 在数据源适配器外面包一层限速、重试和校验：
//! - 限速：所有请求共享同一个最小间隔节流器，跨标的全局串行
//! - 重试：瞬时故障按固定间隔重试，次数耗尽转为终态 `FetchFailed`
//! - 校验门：任何序列（实时或模拟）在被下游使用前都要通过结构校验

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::{ClientConfig, ProviderConfig};
use crate::errors::StockError;
use crate::models::{LatestQuote, PricePoint};
use crate::services::provider::yahoo;

/// 最小间隔节流器
///
/// 显式持有上次请求的时间戳，而不是进程级全局可变状态，
/// 方便测试中创建互相独立的实例。
/// 锁在等待期间一直持有，并发调用方自然串行通过。
pub struct Throttle {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    /// 等待直到距上次放行至少 min_interval，然后记录本次放行时间
    pub async fn acquire(&self) {
        let mut last = self.last_dispatch.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// 带限速与重试的抓取客户端
pub struct FetchClient {
    http: reqwest::Client,
    provider: ProviderConfig,
    client_cfg: ClientConfig,
    throttle: Throttle,
}

impl FetchClient {
    pub fn new(provider: ProviderConfig, client_cfg: ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()?;
        let throttle = Throttle::new(Duration::from_millis(client_cfg.rate_limit_ms));

        Ok(Self {
            http,
            provider,
            client_cfg,
            throttle,
        })
    }

    /// 带限速与重试地执行一次抓取操作
    ///
    /// 只有 `Provider`（瞬时故障）会被重试；`NoDataAvailable` 等
    /// 直接返回，交给调用方的回退策略处理。
    /// 重试次数耗尽后转为 `FetchFailed(symbol, 次数, 最后一次错误)`。
    pub async fn run_with_retry<T, F, Fut>(
        &self,
        symbol: &str,
        mut op: F,
    ) -> Result<T, StockError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StockError>>,
    {
        let attempts = self.client_cfg.retry_attempts.max(1);
        let mut last_message = String::new();

        for attempt in 1..=attempts {
            self.throttle.acquire().await;

            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    last_message = e.to_string();
                    log::warn!(
                        "请求 {} 第 {}/{} 次失败: {}",
                        symbol,
                        attempt,
                        attempts,
                        last_message
                    );
                    if attempt < attempts {
                        tokio::time::sleep(Duration::from_millis(
                            self.client_cfg.retry_delay_ms,
                        ))
                        .await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(StockError::FetchFailed {
            symbol: symbol.to_string(),
            attempts,
            message: last_message,
        })
    }

    /// 抓取历史序列（实时路径），返回前先过校验门
    pub async fn fetch_historical(&self, symbol: &str) -> Result<Vec<PricePoint>, StockError> {
        let http = self.http.clone();
        let cfg = self.provider.clone();
        let sym = symbol.to_string();

        let series = self
            .run_with_retry(symbol, move || {
                let http = http.clone();
                let cfg = cfg.clone();
                let sym = sym.clone();
                async move { yahoo::fetch_historical(&http, &cfg, &sym).await }
            })
            .await?;

        validate_series(&series)?;
        Ok(series)
    }

    /// 抓取最新报价（实时路径）
    pub async fn fetch_latest_quote(&self, symbol: &str) -> Result<LatestQuote, StockError> {
        let http = self.http.clone();
        let cfg = self.provider.clone();
        let sym = symbol.to_string();

        self.run_with_retry(symbol, move || {
            let http = http.clone();
            let cfg = cfg.clone();
            let sym = sym.clone();
            async move { yahoo::fetch_latest_quote(&http, &cfg, &sym).await }
        })
        .await
    }
}

/// 校验门：检查序列的结构不变量
///
/// 要求非空、收盘价为正的有限数、日期严格递增。
/// 空序列报 `NoDataAvailable`，其余问题报 `ValidationFailed`。
pub fn validate_series(series: &[PricePoint]) -> Result<(), StockError> {
    if series.is_empty() {
        return Err(StockError::NoDataAvailable);
    }

    for point in series {
        if !point.close.is_finite() || point.close <= 0.0 {
            return Err(StockError::ValidationFailed(format!(
                "{} 的收盘价非法: {}",
                point.date, point.close
            )));
        }
    }

    for pair in series.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(StockError::ValidationFailed(format!(
                "日期未严格递增: {} -> {}",
                pair[0].date, pair[1].date
            )));
        }
    }

    Ok(())
}
