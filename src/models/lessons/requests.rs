use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::DEFAULT_LESSON_MINUTES;
use crate::entity::lessons::Column;
use crate::models::common::{
    AggregateArgs, DateTimeFilter, FindManyArgs, FindUniqueArgs, GroupByArgs, IntFilter,
    RelationFilter, StringFilter,
};
use crate::models::subjects::requests::SubjectWhereInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LessonWhereInput {
    pub id: Option<IntFilter>,
    pub subject_id: Option<IntFilter>,
    pub title: Option<StringFilter>,
    pub content: Option<StringFilter>,
    pub scheduled_at: Option<DateTimeFilter>,
    pub duration_minutes: Option<IntFilter>,
    pub created_at: Option<DateTimeFilter>,
    pub updated_at: Option<DateTimeFilter>,

    pub subject: Option<RelationFilter<SubjectWhereInput>>,

    #[serde(rename = "AND")]
    pub and: Vec<LessonWhereInput>,
    #[serde(rename = "OR")]
    pub or: Option<Vec<LessonWhereInput>>,
    #[serde(rename = "NOT")]
    pub not: Vec<LessonWhereInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LessonWhereUniqueInput {
    Id(i64),
}

fn default_duration() -> i32 {
    DEFAULT_LESSON_MINUTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCreateInput {
    pub subject_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
}

impl LessonCreateInput {
    pub fn new(subject_id: i64, title: impl Into<String>, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            subject_id,
            title: title.into(),
            content: None,
            scheduled_at,
            duration_minutes: DEFAULT_LESSON_MINUTES,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn duration_minutes(mut self, minutes: i32) -> Self {
        self.duration_minutes = minutes;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LessonUpdateInput {
    pub subject_id: Option<i64>,
    pub title: Option<String>,
    #[serde(deserialize_with = "crate::models::common::nullable::deserialize_nullable")]
    pub content: Option<Option<String>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LessonInclude {
    pub subject: bool,
}

pub type LessonFindManyArgs = FindManyArgs<LessonWhereInput, Column, LessonInclude>;
pub type LessonFindUniqueArgs = FindUniqueArgs<LessonWhereUniqueInput, LessonInclude>;
pub type LessonAggregateArgs = AggregateArgs<LessonWhereInput, Column>;
pub type LessonGroupByArgs = GroupByArgs<LessonWhereInput, Column>;
