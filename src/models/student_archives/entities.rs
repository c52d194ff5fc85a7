use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::users::entities::Gender;

// 学生档案：学生离校时的扁平化快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentArchive {
    pub id: i64,
    pub student_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<DateTime<Utc>>,
    pub class_name: Option<String>,
    pub grade_level: Option<i32>,
    pub academic_year: Option<String>,
    pub teacher_name: Option<String>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub reason: Option<String>,
    pub extra: Option<JsonValue>,
    pub archived_at: DateTime<Utc>,
}
