//! # Loja API
//!
//! 基于 Axum + SQLx 的产品 CRUD 服务，所有响应使用统一的 JSON 信封。
//! 分层结构：
//! - core: 框架核心（错误处理）
//! - infrastructure: 基础设施（配置、数据库、日志）
//! - app: 业务应用（产品领域）

pub mod app;
pub mod core;
pub mod infrastructure;
