//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// 存储层错误
///
/// 包装数据库驱动返回的失败；内存实现也通过它报告 id 转换失败。
#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError(err.to_string())
    }
}

/// API 错误类型
///
/// 处理器通过 `?` 把失败收敛到这里，统一转换为响应信封。
#[derive(Debug)]
pub enum ApiError {
    /// 请求缺少必填字段
    Validacao(String),
    /// 目标产品不存在
    NaoEncontrado,
    /// 存储层失败，客户端只能看到通用消息
    Storage(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validacao(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": msg }),
            ),
            ApiError::NaoEncontrado => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": "Produto não encontrado" }),
            ),
            ApiError::Storage(err) => {
                error!("Storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Erro interno do servidor" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err)
    }
}
