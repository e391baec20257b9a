//! 产品数据模型

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 产品记录
///
/// 可变列全部允许为 NULL：更新操作按位覆盖三个字段，缺失字段落库为 NULL。
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Produto {
    pub id: i32,
    pub nome: Option<String>,
    pub preco: Option<f64>,
    pub categoria: Option<String>,
}

/// 创建产品请求体
#[derive(Debug, Deserialize)]
pub struct NovoProduto {
    pub nome: Option<String>,
    pub preco: Option<f64>,
    pub categoria: Option<String>,
}

/// 更新产品请求体
///
/// 三个字段全部按位写入，缺失字段不做默认值处理。
#[derive(Debug, Deserialize)]
pub struct AtualizaProduto {
    pub nome: Option<String>,
    pub preco: Option<f64>,
    pub categoria: Option<String>,
}
