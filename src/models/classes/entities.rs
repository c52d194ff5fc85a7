use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 班级实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub grade_level: i32,
    pub academic_year: String, // 例如 2024-2025
    pub teacher_id: i64,       // 班主任
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
