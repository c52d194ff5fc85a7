use std::ops::Deref;

use serde::Serialize;

use super::entities::Lesson;
use crate::models::subjects::entities::Subject;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonWithRelations {
    #[serde(flatten)]
    pub lesson: Lesson,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
}

impl From<Lesson> for LessonWithRelations {
    fn from(lesson: Lesson) -> Self {
        Self {
            lesson,
            subject: None,
        }
    }
}

impl Deref for LessonWithRelations {
    type Target = Lesson;

    fn deref(&self) -> &Self::Target {
        &self.lesson
    }
}
