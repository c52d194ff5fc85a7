//! 连接建立与迁移
//!
//! 支持 SQLite、PostgreSQL 和 MySQL，类型从 URL 推断。

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use super::SchoolClient;
use crate::config::DatabaseConfig;
use crate::errors::{Result, SchoolError};

impl SchoolClient<DatabaseConnection> {
    /// 按配置建立连接池
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        info!("数据库连接已建立: {}", db_url);
        Ok(Self {
            db,
            transaction_timeout: Duration::from_millis(config.transaction_timeout_ms),
        })
    }

    /// 包装已有连接，事务超时取默认配置
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            db,
            transaction_timeout: Duration::from_millis(
                DatabaseConfig::default().transaction_timeout_ms,
            ),
        }
    }

    /// 执行全部未应用的迁移
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| SchoolError::migration(format!("数据库迁移失败: {e}")))?;
        info!("数据库迁移完成");
        Ok(())
    }

    /// 连接可用性检查
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| SchoolError::database_connection(format!("数据库不可用: {e}")))
    }

    /// 关闭连接池
    pub async fn disconnect(self) -> Result<()> {
        self.db
            .close()
            .await
            .map_err(|e| SchoolError::database_connection(format!("关闭数据库连接失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::ConnectOptions as _;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");
        if !config.log_queries {
            opt = opt.disable_statement_logging();
        }

        let pool = if in_memory {
            // 内存库随连接关闭而消失，只保留一条常驻连接
            if config.pool_size != 1 {
                warn!("内存 SQLite 只使用单连接，忽略 pool_size = {}", config.pool_size);
            }
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(Duration::from_secs(config.timeout))
                .connect_with(opt)
                .await
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .acquire_timeout(Duration::from_secs(config.timeout))
                .idle_timeout(Duration::from_secs(300))
                .connect_with(
                    opt.journal_mode(SqliteJournalMode::Wal)
                        .pragma("mmap_size", "536870912")
                        .pragma("wal_autocheckpoint", "1000"),
                )
                .await
        };
        let pool =
            pool.map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(config.pool_size.min(5))
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(config.log_queries)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    pub(crate) fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. \
                 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}
