use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::exams::Column;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, FindManyArgs, FindUniqueArgs, FloatFilter, GroupByArgs,
    IntFilter, RelationFilter, StringFilter,
};
use crate::models::subjects::requests::SubjectWhereInput;
use crate::models::users::requests::UserWhereInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExamWhereInput {
    pub id: Option<IntFilter>,
    pub subject_id: Option<IntFilter>,
    pub teacher_id: Option<IntFilter>,
    pub title: Option<StringFilter>,
    pub description: Option<StringFilter>,
    pub exam_date: Option<DateTimeFilter>,
    pub duration_minutes: Option<IntFilter>,
    pub max_score: Option<FloatFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,

    pub subject: Option<RelationFilter<SubjectWhereInput>>,
    pub teacher: Option<RelationFilter<UserWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<ExamWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<ExamWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<ExamWhereInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExamWhereUniqueInput {
    Id(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamCreateInput {
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub exam_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub max_score: f64,
}

impl ExamCreateInput {
    pub fn new(
        subject_id: i64,
        teacher_id: i64,
        title: impl Into<String>,
        exam_date: DateTime<Utc>,
        duration_minutes: i32,
        max_score: f64,
    ) -> Self {
        Self {
            subject_id,
            teacher_id,
            title: title.into(),
            description: None,
            exam_date,
            duration_minutes,
            max_score,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExamUpdateInput {
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub title: Option<String>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub description: Option<Option<String>>,
    pub exam_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub max_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExamInclude {
    pub subject: bool,
    pub teacher: bool,
}

pub type ExamFindManyArgs = FindManyArgs<ExamWhereInput, Column, ExamInclude>;
pub type ExamFindUniqueArgs = FindUniqueArgs<ExamWhereUniqueInput, ExamInclude>;
pub type ExamAggregateArgs = AggregateArgs<ExamWhereInput, Column>;
pub type ExamGroupByArgs = GroupByArgs<ExamWhereInput, Column>;
