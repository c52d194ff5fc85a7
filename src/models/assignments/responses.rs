use std::ops::Deref;

use serde::Serialize;

use super::entities::Assignment;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentWithRelations {
    #[serde(flatten)]
    pub assignment: Assignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<User>,
}

impl From<Assignment> for AssignmentWithRelations {
    fn from(assignment: Assignment) -> Self {
        Self {
            assignment,
            subject: None,
            teacher: None,
        }
    }
}

impl Deref for AssignmentWithRelations {
    type Target = Assignment;

    fn deref(&self) -> &Self::Target {
        &self.assignment
    }
}
