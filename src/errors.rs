//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    RecordNotFound("E004", "Record Not Found"),
    UniqueConstraint("E005", "Unique Constraint Violation"),
    ForeignKeyConstraint("E006", "Foreign Key Constraint Violation"),
    Validation("E007", "Validation Error"),
    Serialization("E008", "Serialization Error"),
    Transaction("E009", "Transaction Error"),
    Migration("E010", "Migration Error"),
    Configuration("E011", "Configuration Error"),
}

impl SchoolError {
    /// 将数据库错误分类，并附加操作上下文
    ///
    /// 唯一约束与外键约束冲突会被识别为独立的错误类型，其余归入数据库操作错误。
    pub fn from_db_err(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                SchoolError::UniqueConstraint(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                SchoolError::ForeignKeyConstraint(format!("{context}: {detail}"))
            }
            _ => SchoolError::DatabaseOperation(format!("{context}: {err}")),
        }
    }

    /// 是否为记录不存在
    pub fn is_not_found(&self) -> bool {
        matches!(self, SchoolError::RecordNotFound(_))
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolError {
    fn from(err: DbErr) -> Self {
        SchoolError::from_db_err("数据库操作失败", err)
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for SchoolError {
    fn from(err: config::ConfigError) -> Self {
        SchoolError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::database_config("test").code(), "E001");
        assert_eq!(SchoolError::record_not_found("test").code(), "E004");
        assert_eq!(SchoolError::unique_constraint("test").code(), "E005");
        assert_eq!(SchoolError::validation("test").code(), "E007");
        assert_eq!(SchoolError::transaction("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::foreign_key_constraint("test").error_type(),
            "Foreign Key Constraint Violation"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolError::record_not_found("No User found");
        assert_eq!(err.message(), "No User found");
        assert!(err.is_not_found());
        assert!(!SchoolError::validation("x").is_not_found());
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::validation("Invalid email");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid email"));
        assert_eq!(err.to_string(), formatted);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_format_colored() {
        let err = SchoolError::record_not_found("No User found");
        let colored = err.format_colored();
        assert!(colored.contains("E004"));
        assert!(colored.contains("No User found"));
        assert!(colored.starts_with("\x1b[1;31m[ERROR]"));
    }

    #[test]
    fn test_plain_db_err_maps_to_operation_error() {
        let err = SchoolError::from_db_err("查询用户失败", DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("查询用户失败"));
        assert!(err.message().contains("boom"));
    }
}
