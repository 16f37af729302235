//! 应用程序入口
//!
//! 启动 HTTP 服务器，默认监听 0.0.0.0:3001（与前端约定的代理端口）

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trading_zones_backend::config::AppConfig;
use trading_zones_backend::handlers;
use trading_zones_backend::services::fetch_client::FetchClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load();

    // 初始化日志系统，级别取自配置，可被 RUST_LOG 覆盖
    env_logger::init_from_env(Env::default().default_filter_or(&config.log.level));

    log::info!("启动 Trading Zones 后端服务，监听 {}", config.bind_addr());
    log::info!(
        "限速 {} ms / 重试 {} 次 / 退避 {} ms / 回退策略 {:?}",
        config.client.rate_limit_ms,
        config.client.retry_attempts,
        config.client.retry_delay_ms,
        config.client.fallback
    );

    // 抓取客户端全局唯一，节流器跨标的共享
    let client = FetchClient::new(config.provider.clone(), config.client.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let client = web::Data::new(client);
    let config_data = web::Data::new(config.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 请求日志中间件
            .wrap(Cors::permissive()) // 仪表盘前端跨域访问
            .app_data(client.clone())
            .app_data(config_data.clone())
            .configure(handlers::config)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
