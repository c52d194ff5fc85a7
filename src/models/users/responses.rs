use std::ops::Deref;

use serde::Serialize;

use super::entities::User;
use crate::models::assignments::entities::Assignment;
use crate::models::attendances::entities::Attendance;
use crate::models::classes::entities::Class;
use crate::models::enrollments::entities::Enrollment;
use crate::models::exams::entities::Exam;
use crate::models::student_parent_relations::entities::StudentParentRelation;
use crate::models::subjects::entities::Subject;

// 用户及其关联数据，未请求的关联为 None
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRelations {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes_taught: Option<Vec<Class>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects_taught: Option<Vec<Subject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Vec<Assignment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exams: Option<Vec<Exam>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollments: Option<Vec<Enrollment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendances: Option<Vec<Attendance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<StudentParentRelation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<StudentParentRelation>>,
}

impl From<User> for UserWithRelations {
    fn from(user: User) -> Self {
        Self {
            user,
            classes_taught: None,
            subjects_taught: None,
            assignments: None,
            exams: None,
            enrollments: None,
            attendances: None,
            parents: None,
            children: None,
        }
    }
}

impl Deref for UserWithRelations {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl UserWithRelations {
    pub fn into_user(self) -> User {
        self.user
    }
}
