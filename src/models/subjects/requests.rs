use serde::{Deserialize, Serialize};

use crate::entity::subjects::Column;
use crate::models::assignments::requests::AssignmentWhereInput;
use crate::models::classes::requests::ClassWhereInput;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, FindManyArgs, FindUniqueArgs, GroupByArgs, IntFilter,
    ListRelationFilter, RelationFilter, StringFilter,
};
use crate::models::exams::requests::ExamWhereInput;
use crate::models::lessons::requests::LessonWhereInput;
use crate::models::users::requests::UserWhereInput;

// 科目过滤条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubjectWhereInput {
    pub id: Option<IntFilter>,
    pub name: Option<StringFilter>,
    pub code: Option<StringFilter>,
    pub description: Option<StringFilter>,
    pub class_id: Option<IntFilter>,
    pub teacher_id: Option<IntFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,

    pub class: Option<RelationFilter<ClassWhereInput>>,
    pub teacher: Option<RelationFilter<UserWhereInput>>,
    pub lessons: Option<ListRelationFilter<LessonWhereInput>>,
    pub assignments: Option<ListRelationFilter<AssignmentWhereInput>>,
    pub exams: Option<ListRelationFilter<ExamWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<SubjectWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<SubjectWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<SubjectWhereInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubjectWhereUniqueInput {
    Id(i64),
}

// 科目创建请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCreateInput {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub class_id: i64,
    pub teacher_id: i64,
}

impl SubjectCreateInput {
    pub fn new(name: impl Into<String>, class_id: i64, teacher_id: i64) -> Self {
        Self {
            name: name.into(),
            code: None,
            description: None,
            class_id,
            teacher_id,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// 科目更新请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubjectUpdateInput {
    pub name: Option<String>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub code: Option<Option<String>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub description: Option<Option<String>>,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubjectInclude {
    pub class: bool,
    pub teacher: bool,
    pub lessons: bool,
    pub assignments: bool,
    pub exams: bool,
}

pub type SubjectFindManyArgs = FindManyArgs<SubjectWhereInput, Column, SubjectInclude>;
pub type SubjectFindUniqueArgs = FindUniqueArgs<SubjectWhereUniqueInput, SubjectInclude>;
pub type SubjectAggregateArgs = AggregateArgs<SubjectWhereInput, Column>;
pub type SubjectGroupByArgs = GroupByArgs<SubjectWhereInput, Column>;
