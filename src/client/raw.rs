//! 原生 SQL 直通
//!
//! `query_raw` / `execute_raw` 使用参数绑定；`execute_raw_unsafe` 原样执行，
//! 调用方负责拼接内容的安全性。

use sea_orm::{ConnectionTrait, FromQueryResult, Statement, Value};
use serde_json::Value as JsonValue;

use super::SchoolClient;
use crate::errors::{Result, SchoolError};

impl<C: ConnectionTrait> SchoolClient<C> {
    /// 执行查询，每行转换为 JSON 对象
    pub async fn query_raw(&self, sql: &str, values: Vec<Value>) -> Result<Vec<JsonValue>> {
        let stmt = Statement::from_sql_and_values(self.db.get_database_backend(), sql, values);
        tracing::debug!(sql, "query_raw");

        JsonValue::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db_err("原生查询失败", e))
    }

    /// 执行带参数的写语句，返回影响行数
    pub async fn execute_raw(&self, sql: &str, values: Vec<Value>) -> Result<u64> {
        let stmt = Statement::from_sql_and_values(self.db.get_database_backend(), sql, values);
        tracing::debug!(sql, "execute_raw");

        self.db
            .execute_raw(stmt)
            .await
            .map(|result| result.rows_affected())
            .map_err(|e| SchoolError::from_db_err("原生语句执行失败", e))
    }

    /// 不做参数绑定直接执行，可包含多条语句
    pub async fn execute_raw_unsafe(&self, sql: &str) -> Result<u64> {
        tracing::warn!(sql, "execute_raw_unsafe");

        self.db
            .execute_unprepared(sql)
            .await
            .map(|result| result.rows_affected())
            .map_err(|e| SchoolError::from_db_err("原生语句执行失败", e))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::users::entities::Role;
    use crate::testing::{memory_client, seed_user};

    #[tokio::test]
    async fn test_query_raw_binds_values() {
        let client = memory_client().await;
        seed_user(&client, "rawuser", Role::Student).await;
        seed_user(&client, "other", Role::Teacher).await;

        let rows = client
            .query_raw(
                "SELECT username, role FROM users WHERE role = ? ORDER BY id",
                vec!["STUDENT".into()],
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["username"], "rawuser");
    }

    #[tokio::test]
    async fn test_execute_raw_counts_rows() {
        let client = memory_client().await;
        seed_user(&client, "first", Role::Student).await;
        seed_user(&client, "second", Role::Student).await;

        let affected = client
            .execute_raw(
                "UPDATE users SET address = ? WHERE role = ?",
                vec!["Dorm 1".into(), "STUDENT".into()],
            )
            .await
            .unwrap();
        assert_eq!(affected, 2);

        let err = client
            .execute_raw_unsafe("UPDATE no_such_table SET x = 1")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");

        let deleted = client
            .execute_raw_unsafe("DELETE FROM users WHERE username = 'first'")
            .await
            .unwrap();
        assert_eq!(deleted, 1);
    }
}
