use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::AttendanceStatus;
use crate::entity::attendances::Column;
use crate::models::classes::requests::ClassWhereInput;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, EnumFilter, FindManyArgs, FindUniqueArgs, GroupByArgs,
    IntFilter, RelationFilter, StringFilter,
};
use crate::models::users::requests::UserWhereInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttendanceWhereInput {
    pub id: Option<IntFilter>,
    pub student_id: Option<IntFilter>,
    pub class_id: Option<IntFilter>,
    pub date: Option<DateTimeFilter>,
    pub status: Option<EnumFilter<AttendanceStatus>>,
    pub remarks: Option<StringFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,

    pub student: Option<RelationFilter<UserWhereInput>>,
    pub class: Option<RelationFilter<ClassWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<AttendanceWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<AttendanceWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<AttendanceWhereInput>,
}

// 唯一选择器：主键或 (student_id, class_id, date) 复合键
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceWhereUniqueInput {
    Id(i64),
    StudentIdClassIdDate {
        student_id: i64,
        class_id: i64,
        date: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceCreateInput {
    pub student_id: i64,
    pub class_id: i64,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl AttendanceCreateInput {
    pub fn new(
        student_id: i64,
        class_id: i64,
        date: DateTime<Utc>,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            student_id,
            class_id,
            date,
            status,
            remarks: None,
        }
    }

    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttendanceUpdateInput {
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub remarks: Option<Option<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttendanceInclude {
    pub student: bool,
    pub class: bool,
}

pub type AttendanceFindManyArgs = FindManyArgs<AttendanceWhereInput, Column, AttendanceInclude>;
pub type AttendanceFindUniqueArgs = FindUniqueArgs<AttendanceWhereUniqueInput, AttendanceInclude>;
pub type AttendanceAggregateArgs = AggregateArgs<AttendanceWhereInput, Column>;
pub type AttendanceGroupByArgs = GroupByArgs<AttendanceWhereInput, Column>;
