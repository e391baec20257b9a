//! 产品 API 服务入口

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use loja_api::app::produto::handler::{self, AppState};
use loja_api::app::produto::service::PgProdutoStore;
use loja_api::infrastructure::{config::Config, database, logger::Logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::init();

    let config = Config::from_env();
    let database_url = config.database_url();

    info!(
        "Connecting to database: {}",
        database_url.replace(&config.db_password, "***")
    );

    let pool = database::connect_lazy(&database_url)?;

    // 建表失败不阻止启动，健康检查会暴露数据库状态
    if let Err(err) = database::ensure_schema(&pool).await {
        warn!("Schema bootstrap failed: {}", err);
    }

    let state = AppState::new(Arc::new(PgProdutoStore::new(pool)));

    let app = handler::routes()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;

    info!("🚀 Servidor rodando na porta {}", config.port);
    info!("📡 Health check: http://localhost:{}/health", config.port);
    info!("📦 Produtos: http://localhost:{}/produtos", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
