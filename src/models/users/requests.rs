use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::{Gender, Role};
use crate::entity::users::Column;
use crate::models::assignments::requests::AssignmentWhereInput;
use crate::models::attendances::requests::AttendanceWhereInput;
use crate::models::classes::requests::ClassWhereInput;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, EnumFilter, FindManyArgs, FindUniqueArgs, GroupByArgs,
    IntFilter, ListRelationFilter, StringFilter,
};
use crate::models::enrollments::requests::EnrollmentWhereInput;
use crate::models::exams::requests::ExamWhereInput;
use crate::models::student_parent_relations::requests::StudentParentRelationWhereInput;
use crate::models::subjects::requests::SubjectWhereInput;

// 用户过滤条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserWhereInput {
    pub id: Option<IntFilter>,
    pub username: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub first_name: Option<StringFilter>,
    pub last_name: Option<StringFilter>,
    pub role: Option<EnumFilter<Role>>,
    pub gender: Option<EnumFilter<Gender>>,
    pub birth_date: Option<DateTimeFilter>,
    pub phone: Option<StringFilter>,
    pub address: Option<StringFilter>,
    pub avatar_url: Option<StringFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,

    pub classes_taught: Option<ListRelationFilter<ClassWhereInput>>,
    pub subjects_taught: Option<ListRelationFilter<SubjectWhereInput>>,
    pub assignments: Option<ListRelationFilter<AssignmentWhereInput>>,
    pub exams: Option<ListRelationFilter<ExamWhereInput>>,
    pub enrollments: Option<ListRelationFilter<EnrollmentWhereInput>>,
    pub attendances: Option<ListRelationFilter<AttendanceWhereInput>>,
    /// 以学生身份关联的家长关系
    pub parents: Option<ListRelationFilter<StudentParentRelationWhereInput>>,
    /// 以家长身份关联的子女关系
    pub children: Option<ListRelationFilter<StudentParentRelationWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<UserWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<UserWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<UserWhereInput>,
}

// 用户唯一选择器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserWhereUniqueInput {
    Id(i64),
    Username(String),
    Email(String),
}

// 用户创建请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateInput {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserCreateInput {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            gender: None,
            birth_date: None,
            phone: None,
            address: None,
            avatar_url: None,
        }
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn birth_date(mut self, birth_date: DateTime<Utc>) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

// 用户更新请求，可空字段使用 Some(None) 清空
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserUpdateInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub gender: Option<Option<Gender>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub birth_date: Option<Option<DateTime<Utc>>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub phone: Option<Option<String>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub address: Option<Option<String>>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub avatar_url: Option<Option<String>>,
}

// 关联加载标志
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInclude {
    pub classes_taught: bool,
    pub subjects_taught: bool,
    pub assignments: bool,
    pub exams: bool,
    pub enrollments: bool,
    pub attendances: bool,
    pub parents: bool,
    pub children: bool,
}

pub type UserFindManyArgs = FindManyArgs<UserWhereInput, Column, UserInclude>;
pub type UserFindUniqueArgs = FindUniqueArgs<UserWhereUniqueInput, UserInclude>;
pub type UserAggregateArgs = AggregateArgs<UserWhereInput, Column>;
pub type UserGroupByArgs = GroupByArgs<UserWhereInput, Column>;
