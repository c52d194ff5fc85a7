use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 学生与家长的关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentParentRelation {
    pub id: i64,
    pub student_id: i64,
    pub parent_id: i64,
    pub relationship: Option<String>, // 例如 mother / father / guardian
    pub created_at: DateTime<Utc>,
}
