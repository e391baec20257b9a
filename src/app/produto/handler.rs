//! 产品 HTTP 处理器

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info};

use super::model::{AtualizaProduto, NovoProduto};
use super::service::ProdutoStore;
use crate::core::error::ApiError;

/// 应用状态，持有注入的产品存储
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProdutoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProdutoStore>) -> Self {
        Self { store }
    }
}

/// 路由表
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health_check))
        .route("/produtos", get(list_produtos).post(create_produto))
        .route(
            "/produtos/:id",
            get(get_produto).put(update_produto).delete(delete_produto),
        )
}

/// 服务横幅，不访问存储
async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "🚀 API funcionando!",
        "status": "success",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// 健康检查
///
/// 这里刻意把底层错误原文返回给调用方，便于运维排查；进程本身可达，
/// 所以 api 字段始终报告在线。
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.now().await {
        Ok(timestamp) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "api": "✅ Online",
                "database": "✅ Conectado",
                "timestamp": timestamp.to_rfc3339()
            })),
        ),
        Err(err) => {
            error!("Health check failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "api": "⚠️ Online",
                    "database": "❌ Desconectado",
                    "error": err.to_string()
                })),
            )
        }
    }
}

/// 列出全部产品
async fn list_produtos(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let produtos = state.store.list_all().await?;

    Ok(Json(json!({
        "success": true,
        "count": produtos.len(),
        "produtos": produtos
    })))
}

/// 按 id 查找产品
async fn get_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let produto = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NaoEncontrado)?;

    Ok(Json(json!({ "success": true, "produto": produto })))
}

/// 创建产品
async fn create_produto(
    State(state): State<AppState>,
    Json(payload): Json<NovoProduto>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    // 缺失、空串、零值都按未提供处理
    let nome = match payload.nome.as_deref() {
        Some(n) if !n.is_empty() => n,
        _ => {
            return Err(ApiError::Validacao(
                "Nome e preço são obrigatórios".to_string(),
            ))
        }
    };
    let preco = match payload.preco {
        Some(p) if p != 0.0 => p,
        _ => {
            return Err(ApiError::Validacao(
                "Nome e preço são obrigatórios".to_string(),
            ))
        }
    };

    // 分类缺失或为空时使用默认分类
    let categoria = match payload.categoria.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => "Geral",
    };

    let produto = state.store.insert(nome, preco, categoria).await?;
    info!("Produto criado: id={}", produto.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Produto criado com sucesso",
            "produto": produto
        })),
    ))
}

/// 更新产品，三个可变字段按位覆盖
async fn update_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AtualizaProduto>,
) -> Result<Json<Value>, ApiError> {
    let produto = state
        .store
        .update(&id, payload.nome, payload.preco, payload.categoria)
        .await?
        .ok_or(ApiError::NaoEncontrado)?;

    info!("Produto atualizado: id={}", produto.id);

    Ok(Json(json!({
        "success": true,
        "message": "Produto atualizado com sucesso",
        "produto": produto
    })))
}

/// 删除产品
async fn delete_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .delete(&id)
        .await?
        .ok_or(ApiError::NaoEncontrado)?;

    info!("Produto deletado: id={}", id);

    Ok(Json(json!({
        "success": true,
        "message": "Produto deletado com sucesso"
    })))
}
