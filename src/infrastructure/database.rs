//! 数据库基础设施

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// 构建数据库连接池
///
/// 连接按需惰性建立：数据库不可达时服务照常启动，健康检查会如实上报。
pub fn connect_lazy(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .connect_lazy(database_url)
}

/// 初始化产品表
///
/// 列全部允许 NULL：更新操作按位覆盖三个字段，缺失的字段以 NULL 写入。
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring produtos table exists...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS produtos (
            id SERIAL PRIMARY KEY,
            nome TEXT,
            preco DOUBLE PRECISION,
            categoria TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
