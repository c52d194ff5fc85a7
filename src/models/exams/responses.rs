use std::ops::Deref;

use serde::Serialize;

use super::entities::Exam;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamWithRelations {
    #[serde(flatten)]
    pub exam: Exam,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<User>,
}

impl From<Exam> for ExamWithRelations {
    fn from(exam: Exam) -> Self {
        Self {
            exam,
            subject: None,
            teacher: None,
        }
    }
}

impl Deref for ExamWithRelations {
    type Target = Exam;

    fn deref(&self) -> &Self::Target {
        &self.exam
    }
}
