//! School Records - 学校管理数据库的类型化访问客户端
//!
//! 基于 SeaORM 构建，按实体提供委托对象完成查询与写入。
//!
//! # 架构
//! - `client`: 客户端入口、连接、原生 SQL 与事务
//! - `config`: 配置管理
//! - `delegates`: 各实体的查询与写入操作
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 业务记录与查询参数
//! - `runtime`: 启动流程
//! - `utils`: 工具函数

pub mod client;
pub mod config;
pub mod delegates;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod utils;

#[cfg(test)]
mod testing;

pub use client::SchoolClient;
pub use errors::{Result, SchoolError};
