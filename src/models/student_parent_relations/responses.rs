use std::ops::Deref;

use serde::Serialize;

use super::entities::StudentParentRelation;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentParentRelationWithRelations {
    #[serde(flatten)]
    pub relation: StudentParentRelation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<User>,
}

impl From<StudentParentRelation> for StudentParentRelationWithRelations {
    fn from(relation: StudentParentRelation) -> Self {
        Self {
            relation,
            student: None,
            parent: None,
        }
    }
}

impl Deref for StudentParentRelationWithRelations {
    type Target = StudentParentRelation;

    fn deref(&self) -> &Self::Target {
        &self.relation
    }
}
