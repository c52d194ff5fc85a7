use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 科目实体，隶属于一个班级并由一位教师负责
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub class_id: i64,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
