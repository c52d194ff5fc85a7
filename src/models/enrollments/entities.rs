use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 学生入班记录，同一学生在同一班级只有一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
    pub enrolled_at: DateTime<Utc>,
}
