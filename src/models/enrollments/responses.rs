use std::ops::Deref;

use serde::Serialize;

use super::entities::Enrollment;
use crate::models::classes::entities::Class;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithRelations {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Class>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<User>,
}

impl From<Enrollment> for EnrollmentWithRelations {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            enrollment,
            class: None,
            student: None,
        }
    }
}

impl Deref for EnrollmentWithRelations {
    type Target = Enrollment;

    fn deref(&self) -> &Self::Target {
        &self.enrollment
    }
}
