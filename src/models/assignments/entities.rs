use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 作业实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_date
    }
}
