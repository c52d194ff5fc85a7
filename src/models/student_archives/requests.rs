use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::entity::student_archives::Column;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, EnumFilter, FindManyArgs, FindUniqueArgs, GroupByArgs,
    IntFilter, StringFilter,
};
use crate::models::users::entities::Gender;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentArchiveWhereInput {
    pub id: Option<IntFilter>,
    pub student_id: Option<IntFilter>,
    pub username: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub first_name: Option<StringFilter>,
    pub last_name: Option<StringFilter>,
    pub gender: Option<EnumFilter<Gender>>,
    pub birth_date: Option<DateTimeFilter>,
    pub class_name: Option<StringFilter>,
    pub grade_level: Option<IntFilter>,
    pub academic_year: Option<StringFilter>,
    pub teacher_name: Option<StringFilter>,
    pub parent_name: Option<StringFilter>,
    pub parent_email: Option<StringFilter>,
    pub parent_phone: Option<StringFilter>,
    pub reason: Option<StringFilter>,
    pub archived_at: Option<DateTimeFilter>,

    #[serde(rename = "AND")]
    pub and: Vec<StudentArchiveWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<StudentArchiveWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<StudentArchiveWhereInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudentArchiveWhereUniqueInput {
    Id(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentArchiveCreateInput {
    pub student_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub grade_level: Option<i32>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub parent_email: Option<String>,
    #[serde(default)]
    pub parent_phone: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub extra: Option<JsonValue>,
    /// 缺省为当前时间
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
}

impl StudentArchiveCreateInput {
    pub fn new(
        student_id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            student_id,
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: None,
            birth_date: None,
            class_name: None,
            grade_level: None,
            academic_year: None,
            teacher_name: None,
            parent_name: None,
            parent_email: None,
            parent_phone: None,
            reason: None,
            extra: None,
            archived_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentArchiveUpdateInput {
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub reason: Option<Option<String>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub extra: Option<Option<JsonValue>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub parent_name: Option<Option<String>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub parent_email: Option<Option<String>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub parent_phone: Option<Option<String>>,
}

// 档案没有关联
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentArchiveInclude {}

pub type StudentArchiveFindManyArgs =
    FindManyArgs<StudentArchiveWhereInput, Column, StudentArchiveInclude>;
pub type StudentArchiveFindUniqueArgs =
    FindUniqueArgs<StudentArchiveWhereUniqueInput, StudentArchiveInclude>;
pub type StudentArchiveAggregateArgs = AggregateArgs<StudentArchiveWhereInput, Column>;
pub type StudentArchiveGroupByArgs = GroupByArgs<StudentArchiveWhereInput, Column>;

// 学生归档请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveStudentInput {
    pub student_id: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub extra: Option<JsonValue>,
    /// 归档后删除学生记录（级联删除入班、考勤、家长关系）
    #[serde(default)]
    pub remove_student: bool,
}

impl ArchiveStudentInput {
    pub fn new(student_id: i64) -> Self {
        Self {
            student_id,
            reason: None,
            extra: None,
            remove_student: false,
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn extra(mut self, extra: JsonValue) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn remove_student(mut self) -> Self {
        self.remove_student = true;
        self
    }
}
