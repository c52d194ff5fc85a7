//! 测试辅助：内存 SQLite 客户端与常用种子数据

use crate::client::SchoolClient;
use crate::config::DatabaseConfig;
use crate::models::classes::entities::Class;
use crate::models::classes::requests::ClassCreateInput;
use crate::models::subjects::entities::Subject;
use crate::models::subjects::requests::SubjectCreateInput;
use crate::models::users::entities::{Role, User};
use crate::models::users::requests::UserCreateInput;

/// 已迁移的内存数据库客户端，每次调用都是一个全新的库
pub(crate) async fn memory_client() -> SchoolClient {
    let config = DatabaseConfig {
        pool_size: 1,
        ..DatabaseConfig::with_url("sqlite::memory:")
    };
    let client = SchoolClient::connect(&config)
        .await
        .expect("connect to in-memory sqlite");
    client.migrate().await.expect("run migrations");
    client
}

pub(crate) async fn seed_user(client: &SchoolClient, username: &str, role: Role) -> User {
    client
        .user()
        .create(UserCreateInput::new(
            username,
            format!("{username}@school.edu"),
            "not-a-real-hash",
            username,
            "Tester",
            role,
        ))
        .await
        .expect("seed user")
}

pub(crate) async fn seed_class(client: &SchoolClient, teacher_id: i64, name: &str) -> Class {
    client
        .class()
        .create(ClassCreateInput::new(name, 1, "2024-2025", teacher_id))
        .await
        .expect("seed class")
}

pub(crate) async fn seed_subject(
    client: &SchoolClient,
    class_id: i64,
    teacher_id: i64,
    name: &str,
) -> Subject {
    client
        .subject()
        .create(SubjectCreateInput::new(name, class_id, teacher_id))
        .await
        .expect("seed subject")
}
