use std::ops::Deref;

use serde::Serialize;

use super::entities::Subject;
use crate::models::assignments::entities::Assignment;
use crate::models::classes::entities::Class;
use crate::models::exams::entities::Exam;
use crate::models::lessons::entities::Lesson;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWithRelations {
    #[serde(flatten)]
    pub subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Class>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<Lesson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Vec<Assignment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exams: Option<Vec<Exam>>,
}

impl From<Subject> for SubjectWithRelations {
    fn from(subject: Subject) -> Self {
        Self {
            subject,
            class: None,
            teacher: None,
            lessons: None,
            assignments: None,
            exams: None,
        }
    }
}

impl Deref for SubjectWithRelations {
    type Target = Subject;

    fn deref(&self) -> &Self::Target {
        &self.subject
    }
}
