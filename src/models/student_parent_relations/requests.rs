use serde::{Deserialize, Serialize};

use crate::entity::student_parent_relations::Column;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, FindManyArgs, FindUniqueArgs, GroupByArgs, IntFilter,
    RelationFilter, StringFilter,
};
use crate::models::users::requests::UserWhereInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentParentRelationWhereInput {
    pub id: Option<IntFilter>,
    pub student_id: Option<IntFilter>,
    pub parent_id: Option<IntFilter>,
    pub relationship: Option<StringFilter>,
    pub created_at: Option<DateTimeFilter>,

    pub student: Option<RelationFilter<UserWhereInput>>,
    pub parent: Option<RelationFilter<UserWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<StudentParentRelationWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<StudentParentRelationWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<StudentParentRelationWhereInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudentParentRelationWhereUniqueInput {
    Id(i64),
    StudentIdParentId { student_id: i64, parent_id: i64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentParentRelationCreateInput {
    pub student_id: i64,
    pub parent_id: i64,
    #[serde(default)]
    pub relationship: Option<String>,
}

impl StudentParentRelationCreateInput {
    pub fn new(student_id: i64, parent_id: i64) -> Self {
        Self {
            student_id,
            parent_id,
            relationship: None,
        }
    }

    pub fn relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentParentRelationUpdateInput {
    pub student_id: Option<i64>,
    pub parent_id: Option<i64>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub relationship: Option<Option<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentParentRelationInclude {
    pub student: bool,
    pub parent: bool,
}

pub type StudentParentRelationFindManyArgs =
    FindManyArgs<StudentParentRelationWhereInput, Column, StudentParentRelationInclude>;
pub type StudentParentRelationFindUniqueArgs =
    FindUniqueArgs<StudentParentRelationWhereUniqueInput, StudentParentRelationInclude>;
pub type StudentParentRelationAggregateArgs =
    AggregateArgs<StudentParentRelationWhereInput, Column>;
pub type StudentParentRelationGroupByArgs = GroupByArgs<StudentParentRelationWhereInput, Column>;
