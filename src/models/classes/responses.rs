use std::ops::Deref;

use serde::Serialize;

use super::entities::Class;
use crate::models::attendances::entities::Attendance;
use crate::models::enrollments::entities::Enrollment;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;

// 班级及其关联数据
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassWithRelations {
    #[serde(flatten)]
    pub class: Class,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<Subject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollments: Option<Vec<Enrollment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendances: Option<Vec<Attendance>>,
}

impl From<Class> for ClassWithRelations {
    fn from(class: Class) -> Self {
        Self {
            class,
            teacher: None,
            subjects: None,
            enrollments: None,
            attendances: None,
        }
    }
}

impl Deref for ClassWithRelations {
    type Target = Class;

    fn deref(&self) -> &Self::Target {
        &self.class
    }
}
