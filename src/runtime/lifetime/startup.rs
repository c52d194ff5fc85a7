use tracing::{debug, info, warn};

use crate::client::SchoolClient;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::{Role, User};
use crate::models::users::requests::UserCreateInput;
use crate::utils::password::hash_password;

pub struct StartupContext {
    pub client: SchoolClient,
    pub admin_created: bool,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个默认的 admin 账号
pub async fn seed_admin(client: &SchoolClient) -> Result<Option<User>> {
    seed_admin_with(client, std::env::var("ADMIN_PASSWORD").ok()).await
}

async fn seed_admin_with(client: &SchoolClient, password: Option<String>) -> Result<Option<User>> {
    // 检查是否已有用户
    let count = client.user().count(None).await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping admin seed",
            count
        );
        return Ok(None);
    }
    info!("No users found in database, creating default admin account...");

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = password.unwrap_or_else(|| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = hash_password(&password)?;
    let admin = client
        .user()
        .create(UserCreateInput::new(
            "admin",
            "admin@school.local",
            password_hash,
            "System",
            "Administrator",
            Role::Admin,
        ))
        .await?;

    info!(
        "Default admin account created successfully (ID: {}, username: {})",
        admin.id, admin.username
    );
    Ok(Some(admin))
}

/// 各表行数
pub async fn entity_counts(client: &SchoolClient) -> Result<Vec<(&'static str, u64)>> {
    Ok(vec![
        ("users", client.user().count(None).await?),
        ("classes", client.class().count(None).await?),
        ("subjects", client.subject().count(None).await?),
        ("enrollments", client.enrollment().count(None).await?),
        (
            "student_parent_relations",
            client.student_parent_relation().count(None).await?,
        ),
        ("lessons", client.lesson().count(None).await?),
        ("assignments", client.assignment().count(None).await?),
        ("exams", client.exam().count(None).await?),
        ("attendances", client.attendance().count(None).await?),
        ("student_archives", client.student_archive().count(None).await?),
    ])
}

/// 连接数据库、执行迁移并准备初始数据
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    let client = SchoolClient::connect(&config.database).await?;
    client.ping().await?;

    if config.database.run_migrations {
        client.migrate().await?;
    } else {
        warn!("Automatic migrations disabled, assuming schema is up to date");
    }

    // 初始化默认管理员账号（如果需要）
    let admin_created = seed_admin(&client).await?.is_some();

    for (table, count) in entity_counts(&client).await? {
        info!(table, count, "row count");
    }

    Ok(StartupContext {
        client,
        admin_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{memory_client, seed_user};
    use crate::utils::password::verify_password;

    #[test]
    fn test_generated_password_charset() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert!(pwd.chars().all(|c| c.is_ascii_graphic()));
    }

    #[tokio::test]
    async fn test_seed_admin_on_empty_database() {
        let client = memory_client().await;
        let admin = seed_admin_with(&client, Some("s3cret-pass".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(verify_password("s3cret-pass", &admin.password_hash));

        // 已有用户时不再创建
        assert!(seed_admin_with(&client, None).await.unwrap().is_none());
        assert_eq!(client.user().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_admin_skips_populated_database() {
        let client = memory_client().await;
        seed_user(&client, "existing", Role::Teacher).await;
        assert!(seed_admin_with(&client, None).await.unwrap().is_none());

        let counts = entity_counts(&client).await.unwrap();
        assert_eq!(counts.len(), 10);
        assert_eq!(counts[0], ("users", 1));
        assert!(counts[1..].iter().all(|(_, n)| *n == 0));
    }
}
