use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::assignments::Column;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, FindManyArgs, FindUniqueArgs, FloatFilter, GroupByArgs,
    IntFilter, RelationFilter, StringFilter,
};
use crate::models::subjects::requests::SubjectWhereInput;
use crate::models::users::requests::UserWhereInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignmentWhereInput {
    pub id: Option<IntFilter>,
    pub subject_id: Option<IntFilter>,
    pub teacher_id: Option<IntFilter>,
    pub title: Option<StringFilter>,
    pub description: Option<StringFilter>,
    pub due_date: Option<DateTimeFilter>,
    pub max_score: Option<FloatFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,

    pub subject: Option<RelationFilter<SubjectWhereInput>>,
    pub teacher: Option<RelationFilter<UserWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<AssignmentWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<AssignmentWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<AssignmentWhereInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentWhereUniqueInput {
    Id(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCreateInput {
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_score: f64,
}

impl AssignmentCreateInput {
    pub fn new(
        subject_id: i64,
        teacher_id: i64,
        title: impl Into<String>,
        due_date: DateTime<Utc>,
        max_score: f64,
    ) -> Self {
        Self {
            subject_id,
            teacher_id,
            title: title.into(),
            description: None,
            due_date,
            max_score,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignmentUpdateInput {
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub title: Option<String>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub description: Option<Option<String>>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignmentInclude {
    pub subject: bool,
    pub teacher: bool,
}

pub type AssignmentFindManyArgs = FindManyArgs<AssignmentWhereInput, Column, AssignmentInclude>;
pub type AssignmentFindUniqueArgs = FindUniqueArgs<AssignmentWhereUniqueInput, AssignmentInclude>;
pub type AssignmentAggregateArgs = AggregateArgs<AssignmentWhereInput, Column>;
pub type AssignmentGroupByArgs = GroupByArgs<AssignmentWhereInput, Column>;
