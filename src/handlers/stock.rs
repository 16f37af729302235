//! 股票接口处理器
//!
//! `/api/stock` 是与前端约定死的代理接口：成功时返回裸数组，
//! 错误文案逐字固定（见 models::response），且不走模拟数据回退。
//! `/api/stock/quote` 与 `/api/stock/analysis` 是仪表盘接口，
//! 遵循配置的回退策略。

use actix_web::{web, HttpResponse, Result};

use crate::config::AppConfig;
use crate::errors::StockError;
use crate::models::{
    AnalysisQuery, ErrorBody, StockQuery, ERR_FETCH_FAILED, ERR_NO_DATA, ERR_SYMBOL_REQUIRED,
};
use crate::services::fetch_client::FetchClient;
use crate::services::stock_service;

/// 默认短周期均线窗口
const DEFAULT_SMA_SHORT: usize = 20;
/// 默认长周期均线窗口
const DEFAULT_SMA_LONG: usize = 50;

/// 校验 symbol 参数，缺失或空白直接拒绝
fn require_symbol(symbol: &Option<String>) -> Result<String, StockError> {
    match symbol {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(StockError::InvalidInput("缺少 symbol 参数".to_string())),
    }
}

/// 仪表盘接口的错误映射
fn error_response(e: &StockError) -> HttpResponse {
    match e {
        StockError::InvalidInput(_) => {
            HttpResponse::BadRequest().json(ErrorBody::new(ERR_SYMBOL_REQUIRED))
        }
        StockError::NoDataAvailable
        | StockError::ValidationFailed(_)
        | StockError::QuoteUnavailable(_) => {
            HttpResponse::NotFound().json(ErrorBody::new(&e.to_string()))
        }
        StockError::Provider(_) | StockError::FetchFailed { .. } => {
            HttpResponse::InternalServerError().json(ErrorBody::new(&e.to_string()))
        }
    }
}

/// GET /api/stock?symbol=T — 历史收盘价代理接口（固定契约）
pub async fn get_stock(
    query: web::Query<StockQuery>,
    client: web::Data<FetchClient>,
) -> Result<HttpResponse> {
    let symbol = match require_symbol(&query.symbol) {
        Ok(s) => s,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ErrorBody::new(ERR_SYMBOL_REQUIRED)))
        }
    };

    match client.fetch_historical(&symbol).await {
        Ok(series) => Ok(HttpResponse::Ok().json(series)),
        Err(StockError::NoDataAvailable) | Err(StockError::ValidationFailed(_)) => {
            Ok(HttpResponse::NotFound().json(ErrorBody::new(ERR_NO_DATA)))
        }
        Err(e) => {
            log::error!("获取 {} 历史数据失败: {}", symbol, e);
            Ok(HttpResponse::InternalServerError().json(ErrorBody::new(ERR_FETCH_FAILED)))
        }
    }
}

/// GET /api/stock/quote?symbol=T — 最新报价
pub async fn get_quote(
    query: web::Query<StockQuery>,
    client: web::Data<FetchClient>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse> {
    let symbol = match require_symbol(&query.symbol) {
        Ok(s) => s,
        Err(e) => return Ok(error_response(&e)),
    };

    match stock_service::get_latest_quote(&client, &config, &symbol).await {
        Ok((quote, _source)) => Ok(HttpResponse::Ok().json(quote)),
        Err(e) => {
            log::error!("获取 {} 最新报价失败: {}", symbol, e);
            Ok(error_response(&e))
        }
    }
}

/// GET /api/stock/analysis?symbol=T&sma=20&sma2=50 — 完整分析
pub async fn get_analysis(
    query: web::Query<AnalysisQuery>,
    client: web::Data<FetchClient>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse> {
    let symbol = match require_symbol(&query.symbol) {
        Ok(s) => s,
        Err(e) => return Ok(error_response(&e)),
    };

    let sma_short = query.sma.unwrap_or(DEFAULT_SMA_SHORT);
    let sma_long = query.sma2.unwrap_or(DEFAULT_SMA_LONG);

    match stock_service::get_analysis(&client, &config, &symbol, sma_short, sma_long).await {
        Ok(analysis) => Ok(HttpResponse::Ok().json(analysis)),
        Err(e) => {
            log::error!("分析 {} 失败: {}", symbol, e);
            Ok(error_response(&e))
        }
    }
}

/// GET /api/stocks — 自选股列表
pub async fn list_stocks(config: web::Data<AppConfig>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&config.watchlist))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/stock", web::get().to(get_stock))
            .route("/stock/quote", web::get().to(get_quote))
            .route("/stock/analysis", web::get().to(get_analysis))
            .route("/stocks", web::get().to(list_stocks)),
    );
}
