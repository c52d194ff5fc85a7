//! 交互式事务
//!
//! 闭包返回 `Ok` 时提交，返回 `Err` 或超时时回滚。
//! 在事务客户端上再次调用 `transaction` 会开启保存点。

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseTransaction, DbBackend, IsolationLevel, TransactionTrait,
};
use tracing::{debug, warn};

use super::SchoolClient;
use crate::errors::{Result, SchoolError};

/// 事务闭包返回的 future
pub type TransactionFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'c>>;

/// 事务选项
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionOptions {
    pub isolation_level: Option<IsolationLevel>,
    pub access_mode: Option<AccessMode>,
    /// 缺省使用客户端配置的超时
    pub timeout: Option<Duration>,
}

impl TransactionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn isolation_level(mut self, level: IsolationLevel) -> Self {
        self.isolation_level = Some(level);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.access_mode = Some(AccessMode::ReadOnly);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl<C> SchoolClient<C>
where
    C: TransactionTrait<Transaction = DatabaseTransaction>,
{
    /// 以默认选项执行事务
    pub async fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c SchoolClient<DatabaseTransaction>) -> TransactionFuture<'c, T>
            + Send,
        T: Send,
    {
        self.transaction_with(TransactionOptions::default(), f).await
    }

    /// 以指定选项执行事务
    pub async fn transaction_with<F, T>(&self, options: TransactionOptions, f: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c SchoolClient<DatabaseTransaction>) -> TransactionFuture<'c, T>
            + Send,
        T: Send,
    {
        let timeout = options.timeout.unwrap_or(self.transaction_timeout);
        let txn = self
            .db
            .begin_with_config(options.isolation_level, options.access_mode)
            .await
            .map_err(|e| SchoolError::transaction(format!("开启事务失败: {e}")))?;

        // SQLite 不支持事务级访问模式，只读事务改用 query_only
        let query_only = options.access_mode == Some(AccessMode::ReadOnly)
            && txn.get_database_backend() == DbBackend::Sqlite;
        if query_only {
            set_query_only(&txn, true).await?;
        }

        let scoped = SchoolClient {
            db: txn,
            transaction_timeout: self.transaction_timeout,
        };

        let outcome = tokio::time::timeout(timeout, f(&scoped)).await;
        let txn = scoped.db;
        if query_only {
            set_query_only(&txn, false).await?;
        }

        match outcome {
            Ok(Ok(value)) => {
                txn.commit()
                    .await
                    .map_err(|e| SchoolError::transaction(format!("提交事务失败: {e}")))?;
                debug!("事务已提交");
                Ok(value)
            }
            Ok(Err(err)) => {
                rollback(txn).await;
                debug!(code = err.code(), "事务已回滚");
                Err(err)
            }
            Err(_) => {
                rollback(txn).await;
                warn!(timeout_ms = timeout.as_millis() as u64, "事务超时，已回滚");
                Err(SchoolError::transaction(format!(
                    "事务在 {} ms 内未完成",
                    timeout.as_millis()
                )))
            }
        }
    }
}

async fn set_query_only(txn: &DatabaseTransaction, enabled: bool) -> Result<()> {
    let sql = if enabled {
        "PRAGMA query_only = ON"
    } else {
        "PRAGMA query_only = OFF"
    };
    txn.execute_unprepared(sql)
        .await
        .map_err(|e| SchoolError::transaction(format!("切换只读模式失败: {e}")))?;
    Ok(())
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        warn!("事务回滚失败: {e}");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sea_orm::{AccessMode, IsolationLevel};

    use super::TransactionOptions;
    use crate::errors::SchoolError;
    use crate::models::users::entities::Role;
    use crate::models::users::requests::UserCreateInput;
    use crate::testing::{memory_client, seed_user};

    fn input(name: &str) -> UserCreateInput {
        UserCreateInput::new(name, format!("{name}@school.edu"), "hash", "T", "X", Role::Student)
    }

    #[tokio::test]
    async fn test_commit_on_ok() {
        let client = memory_client().await;
        let id = client
            .transaction(|tx| {
                Box::pin(async move {
                    let user = tx.user().create(input("commit")).await?;
                    tx.user().create(input("commit2")).await?;
                    Ok::<_, SchoolError>(user.id)
                })
            })
            .await
            .unwrap();

        assert!(id > 0);
        assert_eq!(client.user().count(None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_rollback_on_err() {
        let client = memory_client().await;
        let err = client
            .transaction(|tx| {
                Box::pin(async move {
                    tx.user().create(input("ghost")).await?;
                    Err::<(), _>(SchoolError::validation("abort"))
                })
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "E007");
        assert_eq!(client.user().count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_constraint_failure_rolls_back_earlier_writes() {
        let client = memory_client().await;
        seed_user(&client, "taken", Role::Student).await;

        let err = client
            .transaction(|tx| {
                Box::pin(async move {
                    tx.user().create(input("fresh")).await?;
                    tx.user().create(input("taken")).await?;
                    Ok::<_, SchoolError>(())
                })
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "E005");
        assert_eq!(client.user().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_timeout_rolls_back() {
        let client = memory_client().await;
        let err = client
            .transaction_with(
                TransactionOptions::new().timeout(Duration::from_millis(50)),
                |tx| {
                    Box::pin(async move {
                        tx.user().create(input("slow")).await?;
                        tokio::time::sleep(Duration::from_millis(500)).await;
                        Ok::<_, SchoolError>(())
                    })
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "E009");
        assert_eq!(client.user().count(None).await.unwrap(), 0);
    }

    #[test]
    fn test_options_builder() {
        let options = TransactionOptions::new()
            .isolation_level(IsolationLevel::Serializable)
            .read_only()
            .timeout(Duration::from_secs(2));
        assert_eq!(options.isolation_level, Some(IsolationLevel::Serializable));
        assert_eq!(options.access_mode, Some(AccessMode::ReadOnly));
        assert_eq!(options.timeout, Some(Duration::from_secs(2)));
        assert!(TransactionOptions::default().access_mode.is_none());
    }

    #[tokio::test]
    async fn test_isolation_level_commits() {
        let client = memory_client().await;
        let options = TransactionOptions::new().isolation_level(IsolationLevel::Serializable);
        client
            .transaction_with(options, |tx| {
                Box::pin(async move {
                    tx.user().create(input("serial")).await?;
                    Ok::<_, SchoolError>(())
                })
            })
            .await
            .unwrap();
        assert_eq!(client.user().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_read_only_rejects_writes() {
        let client = memory_client().await;
        seed_user(&client, "reader", Role::Teacher).await;

        let seen = client
            .transaction_with(TransactionOptions::new().read_only(), |tx| {
                Box::pin(async move { tx.user().count(None).await })
            })
            .await
            .unwrap();
        assert_eq!(seen, 1);

        let err = client
            .transaction_with(TransactionOptions::new().read_only(), |tx| {
                Box::pin(async move {
                    tx.user().create(input("writer")).await?;
                    Ok::<_, SchoolError>(())
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
        assert_eq!(client.user().count(None).await.unwrap(), 1);

        // 只读结束后连接恢复可写
        client.user().create(input("writer")).await.unwrap();
        assert_eq!(client.user().count(None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_nested_transaction_uses_savepoint() {
        let client = memory_client().await;
        client
            .transaction(|tx| {
                Box::pin(async move {
                    tx.user().create(input("outer")).await?;
                    let inner = tx
                        .transaction(|inner| {
                            Box::pin(async move {
                                inner.user().create(input("inner")).await?;
                                Err::<(), _>(SchoolError::validation("undo inner"))
                            })
                        })
                        .await;
                    assert!(inner.is_err());
                    Ok::<_, SchoolError>(())
                })
            })
            .await
            .unwrap();

        let users = client
            .user()
            .find_many(crate::models::common::FindManyArgs::new())
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "outer");
    }
}
