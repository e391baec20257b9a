//! 产品存储服务
//!
//! 处理器只依赖 [`ProdutoStore`] trait，具体实现（连接池）在启动时注入，
//! 测试可替换为内存实现。

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::model::Produto;
use crate::core::error::StoreError;

/// 产品存储接口
#[async_trait]
pub trait ProdutoStore: Send + Sync {
    /// 存活探测，返回存储端时间戳
    async fn now(&self) -> Result<DateTime<Utc>, StoreError>;

    /// 按 id 升序返回全部产品
    async fn list_all(&self) -> Result<Vec<Produto>, StoreError>;

    /// 按 id 查找产品
    async fn find_by_id(&self, id: &str) -> Result<Option<Produto>, StoreError>;

    /// 插入新产品，id 由存储端分配
    async fn insert(&self, nome: &str, preco: f64, categoria: &str)
        -> Result<Produto, StoreError>;

    /// 按位覆盖三个可变字段，None 落库为 NULL；返回 None 表示无匹配行
    async fn update(
        &self,
        id: &str,
        nome: Option<String>,
        preco: Option<f64>,
        categoria: Option<String>,
    ) -> Result<Option<Produto>, StoreError>;

    /// 删除产品并返回被删除的行
    async fn delete(&self, id: &str) -> Result<Option<Produto>, StoreError>;
}

/// 基于 PostgreSQL 的产品存储
///
/// id 参数原样下传，格式错误由数据库在 `::int4` 转换时拒绝。
#[derive(Clone)]
pub struct PgProdutoStore {
    pool: PgPool,
}

impl PgProdutoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProdutoStore for PgProdutoStore {
    async fn now(&self) -> Result<DateTime<Utc>, StoreError> {
        let row: (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn list_all(&self) -> Result<Vec<Produto>, StoreError> {
        let produtos = sqlx::query_as::<_, Produto>("SELECT * FROM produtos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(produtos)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Produto>, StoreError> {
        let produto = sqlx::query_as::<_, Produto>("SELECT * FROM produtos WHERE id = $1::int4")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(produto)
    }

    async fn insert(
        &self,
        nome: &str,
        preco: f64,
        categoria: &str,
    ) -> Result<Produto, StoreError> {
        let produto = sqlx::query_as::<_, Produto>(
            "INSERT INTO produtos (nome, preco, categoria) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(nome)
        .bind(preco)
        .bind(categoria)
        .fetch_one(&self.pool)
        .await?;
        Ok(produto)
    }

    async fn update(
        &self,
        id: &str,
        nome: Option<String>,
        preco: Option<f64>,
        categoria: Option<String>,
    ) -> Result<Option<Produto>, StoreError> {
        let produto = sqlx::query_as::<_, Produto>(
            "UPDATE produtos SET nome = $1, preco = $2, categoria = $3 \
             WHERE id = $4::int4 RETURNING *",
        )
        .bind(nome)
        .bind(preco)
        .bind(categoria)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(produto)
    }

    async fn delete(&self, id: &str) -> Result<Option<Produto>, StoreError> {
        let produto =
            sqlx::query_as::<_, Produto>("DELETE FROM produtos WHERE id = $1::int4 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(produto)
    }
}

/// 内存产品存储
///
/// 行为对齐 PostgreSQL 实现：id 单调递增、列表按 id 升序、
/// 非法 id 字符串按存储层错误处理。
#[derive(Clone, Default)]
pub struct MemoryProdutoStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    next_id: i32,
    rows: BTreeMap<i32, Produto>,
}

fn parse_id(id: &str) -> Result<i32, StoreError> {
    id.trim()
        .parse::<i32>()
        .map_err(|_| StoreError(format!("invalid input syntax for type integer: \"{}\"", id)))
}

#[async_trait]
impl ProdutoStore for MemoryProdutoStore {
    async fn now(&self) -> Result<DateTime<Utc>, StoreError> {
        Ok(Utc::now())
    }

    async fn list_all(&self) -> Result<Vec<Produto>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Produto>, StoreError> {
        let id = parse_id(id)?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(
        &self,
        nome: &str,
        preco: f64,
        categoria: &str,
    ) -> Result<Produto, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let produto = Produto {
            id: inner.next_id,
            nome: Some(nome.to_string()),
            preco: Some(preco),
            categoria: Some(categoria.to_string()),
        };
        inner.rows.insert(produto.id, produto.clone());
        Ok(produto)
    }

    async fn update(
        &self,
        id: &str,
        nome: Option<String>,
        preco: Option<f64>,
        categoria: Option<String>,
    ) -> Result<Option<Produto>, StoreError> {
        let id = parse_id(id)?;
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.get_mut(&id) {
            Some(row) => {
                row.nome = nome;
                row.preco = preco;
                row.categoria = categoria;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<Option<Produto>, StoreError> {
        let id = parse_id(id)?;
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.rows.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_ascending_ids() {
        let store = MemoryProdutoStore::default();

        let p1 = store.insert("Caneca", 19.9, "Geral").await.unwrap();
        let p2 = store.insert("Caderno", 12.5, "Papelaria").await.unwrap();

        assert_eq!(p1.id, 1);
        assert_eq!(p2.id, 2);

        let todos = store.list_all().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert!(todos[0].id < todos[1].id);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = MemoryProdutoStore::default();
        assert!(store.find_by_id("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_id_is_store_error() {
        let store = MemoryProdutoStore::default();
        let err = store.find_by_id("abc").await.unwrap_err();
        assert!(err.to_string().contains("invalid input syntax"));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let store = MemoryProdutoStore::default();
        let criado = store.insert("Caneca", 19.9, "Cozinha").await.unwrap();

        let atualizado = store
            .update(&criado.id.to_string(), Some("X".to_string()), Some(5.0), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(atualizado.nome.as_deref(), Some("X"));
        assert_eq!(atualizado.preco, Some(5.0));
        assert_eq!(atualizado.categoria, None);
    }

    #[tokio::test]
    async fn test_delete_returns_row_then_none() {
        let store = MemoryProdutoStore::default();
        let criado = store.insert("Caneca", 19.9, "Geral").await.unwrap();
        let id = criado.id.to_string();

        assert!(store.delete(&id).await.unwrap().is_some());
        assert!(store.delete(&id).await.unwrap().is_none());
    }
}
