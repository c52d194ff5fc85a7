use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub argon2: Argon2Config,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,                 // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32,              // 连接池大小
    pub timeout: u64,                // 连接超时 (秒)
    pub log_queries: bool,           // 是否输出 SQL 日志
    pub run_migrations: bool,        // 连接后是否自动执行迁移
    pub transaction_timeout_ms: u64, // 交互式事务默认超时 (毫秒)
}

impl DatabaseConfig {
    /// 指定 URL，其余使用默认值
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "school.db".to_string(),
            pool_size: 10,
            timeout: 30,
            log_queries: false,
            run_migrations: true,
            transaction_timeout_ms: 5000,
        }
    }
}

/// Argon2 密码哈希参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32, // KiB
    pub time_cost: u32,
    pub parallelism: u32,
}
