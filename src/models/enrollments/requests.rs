use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::enrollments::Column;
use crate::models::classes::requests::ClassWhereInput;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, FindManyArgs, FindUniqueArgs, GroupByArgs, IntFilter,
    RelationFilter,
};
use crate::models::users::requests::UserWhereInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnrollmentWhereInput {
    pub id: Option<IntFilter>,
    pub class_id: Option<IntFilter>,
    pub student_id: Option<IntFilter>,
    pub enrolled_at: Option<DateTimeFilter>,

    pub class: Option<RelationFilter<ClassWhereInput>>,
    pub student: Option<RelationFilter<UserWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<EnrollmentWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<EnrollmentWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<EnrollmentWhereInput>,
}

// 唯一选择器：主键或 (class_id, student_id) 复合键
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnrollmentWhereUniqueInput {
    Id(i64),
    ClassIdStudentId { class_id: i64, student_id: i64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCreateInput {
    pub class_id: i64,
    pub student_id: i64,
    /// 缺省为当前时间
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl EnrollmentCreateInput {
    pub fn new(class_id: i64, student_id: i64) -> Self {
        Self {
            class_id,
            student_id,
            enrolled_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnrollmentUpdateInput {
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
    pub enrolled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnrollmentInclude {
    pub class: bool,
    pub student: bool,
}

pub type EnrollmentFindManyArgs = FindManyArgs<EnrollmentWhereInput, Column, EnrollmentInclude>;
pub type EnrollmentFindUniqueArgs = FindUniqueArgs<EnrollmentWhereUniqueInput, EnrollmentInclude>;
pub type EnrollmentAggregateArgs = AggregateArgs<EnrollmentWhereInput, Column>;
pub type EnrollmentGroupByArgs = GroupByArgs<EnrollmentWhereInput, Column>;
