use serde::{Deserialize, Serialize};

use crate::entity::classes::Column;
use crate::models::attendances::requests::AttendanceWhereInput;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, FindManyArgs, FindUniqueArgs, GroupByArgs, IntFilter,
    ListRelationFilter, RelationFilter, StringFilter,
};
use crate::models::enrollments::requests::EnrollmentWhereInput;
use crate::models::subjects::requests::SubjectWhereInput;
use crate::models::users::requests::UserWhereInput;

// 班级过滤条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassWhereInput {
    pub id: Option<IntFilter>,
    pub name: Option<StringFilter>,
    pub grade_level: Option<IntFilter>,
    pub academic_year: Option<StringFilter>,
    pub teacher_id: Option<IntFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,

    pub teacher: Option<RelationFilter<UserWhereInput>>,
    pub subjects: Option<ListRelationFilter<SubjectWhereInput>>,
    pub enrollments: Option<ListRelationFilter<EnrollmentWhereInput>>,
    pub attendances: Option<ListRelationFilter<AttendanceWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<ClassWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<ClassWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<ClassWhereInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassWhereUniqueInput {
    Id(i64),
}

// 班级创建请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassCreateInput {
    pub name: String,
    pub grade_level: i32,
    pub academic_year: String,
    pub teacher_id: i64,
}

impl ClassCreateInput {
    pub fn new(
        name: impl Into<String>,
        grade_level: i32,
        academic_year: impl Into<String>,
        teacher_id: i64,
    ) -> Self {
        Self {
            name: name.into(),
            grade_level,
            academic_year: academic_year.into(),
            teacher_id,
        }
    }
}

// 班级更新请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassUpdateInput {
    pub name: Option<String>,
    pub grade_level: Option<i32>,
    pub academic_year: Option<String>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassInclude {
    pub teacher: bool,
    pub subjects: bool,
    pub enrollments: bool,
    pub attendances: bool,
}

pub type ClassFindManyArgs = FindManyArgs<ClassWhereInput, Column, ClassInclude>;
pub type ClassFindUniqueArgs = FindUniqueArgs<ClassWhereUniqueInput, ClassInclude>;
pub type ClassAggregateArgs = AggregateArgs<ClassWhereInput, Column>;
pub type ClassGroupByArgs = GroupByArgs<ClassWhereInput, Column>;
