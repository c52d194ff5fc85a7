use std::ops::Deref;

use serde::Serialize;

use super::entities::Attendance;
use crate::models::classes::entities::Class;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithRelations {
    #[serde(flatten)]
    pub attendance: Attendance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Class>,
}

impl From<Attendance> for AttendanceWithRelations {
    fn from(attendance: Attendance) -> Self {
        Self {
            attendance,
            student: None,
            class: None,
        }
    }
}

impl Deref for AttendanceWithRelations {
    type Target = Attendance;

    fn deref(&self) -> &Self::Target {
        &self.attendance
    }
}
