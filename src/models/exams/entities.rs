use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 考试实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub exam_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub max_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
