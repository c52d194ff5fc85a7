//! 字段过滤器
//!
//! 每种标量类型对应一个过滤器结构体，所有字段均为可选，多个条件之间为 AND 关系。
//! 过滤器通过 `to_condition` 转换为 SeaORM 的 `Condition`，由各实体的 where 输入组合使用。

use std::fmt::Display;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{LikeExpr, Query, SelectStatement};
use sea_orm::{ColumnTrait, Condition, Value};
use serde::{Deserialize, Serialize};

use super::expr::lower_like;
use crate::utils::escape_like_pattern;

/// 实体 where 输入的公共行为
pub trait WhereInput {
    fn to_condition(&self) -> Condition;
}

/// 将 AND / OR / NOT 子条件合并到已有条件中
///
/// 显式给出的空 `OR` 不匹配任何记录，空 `AND` / `NOT` 不起作用。
pub fn combine_logical<W: WhereInput>(
    mut condition: Condition,
    and: &[W],
    or: Option<&[W]>,
    not: &[W],
) -> Condition {
    for nested in and {
        condition = condition.add(nested.to_condition());
    }

    if let Some(or) = or {
        let any = or
            .iter()
            .fold(Condition::any(), |acc, nested| acc.add(nested.to_condition()));
        condition = condition.add(any);
    }

    for nested in not {
        condition = condition.add(nested.to_condition().not());
    }

    condition
}

fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like_pattern(value))
}

fn prefix_pattern(value: &str) -> String {
    format!("{}%", escape_like_pattern(value))
}

fn suffix_pattern(value: &str) -> String {
    format!("%{}", escape_like_pattern(value))
}

fn null_condition<C: ColumnTrait>(column: C, is_null: Option<bool>) -> Option<Condition> {
    match is_null {
        Some(true) => Some(Condition::all().add(column.is_null())),
        Some(false) => Some(Condition::all().add(column.is_not_null())),
        None => None,
    }
}

/// 字符串匹配模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    #[default]
    Default,
    Insensitive,
}

/// 字符串过滤器
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringFilter {
    pub equals: Option<String>,
    pub not: Option<String>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<String>>,
    pub not_in: Option<Vec<String>>,
    pub contains: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub gt: Option<String>,
    pub gte: Option<String>,
    pub lt: Option<String>,
    pub lte: Option<String>,
    pub mode: QueryMode,
    /// 仅对可空字段有意义
    pub is_null: Option<bool>,
}

impl StringFilter {
    pub fn equals(value: impl Into<String>) -> Self {
        Self {
            equals: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn starts_with(value: impl Into<String>) -> Self {
        Self {
            starts_with: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn ends_with(value: impl Into<String>) -> Self {
        Self {
            ends_with: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn in_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            in_list: Some(values.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn is_null(is_null: bool) -> Self {
        Self {
            is_null: Some(is_null),
            ..Default::default()
        }
    }

    /// 切换为大小写不敏感匹配
    pub fn insensitive(mut self) -> Self {
        self.mode = QueryMode::Insensitive;
        self
    }

    pub fn to_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let insensitive = self.mode == QueryMode::Insensitive;
        let mut cond = Condition::all();

        if let Some(ref value) = self.equals {
            cond = if insensitive {
                cond.add(lower_like(column, &escape_like_pattern(value)))
            } else {
                cond.add(column.eq(value.as_str()))
            };
        }

        if let Some(ref value) = self.not {
            cond = if insensitive {
                cond.add(lower_like(column, &escape_like_pattern(value)).not())
            } else {
                cond.add(column.ne(value.as_str()))
            };
        }

        if let Some(ref values) = self.in_list {
            cond = cond.add(column.is_in(values.iter().map(String::as_str)));
        }

        if let Some(ref values) = self.not_in {
            cond = cond.add(column.is_not_in(values.iter().map(String::as_str)));
        }

        let patterns = [
            self.contains.as_deref().map(contains_pattern),
            self.starts_with.as_deref().map(prefix_pattern),
            self.ends_with.as_deref().map(suffix_pattern),
        ];
        for pattern in patterns.into_iter().flatten() {
            cond = if insensitive {
                cond.add(lower_like(column, &pattern))
            } else {
                cond.add(column.like(LikeExpr::new(pattern).escape('\\')))
            };
        }

        if let Some(ref value) = self.gt {
            cond = cond.add(column.gt(value.as_str()));
        }
        if let Some(ref value) = self.gte {
            cond = cond.add(column.gte(value.as_str()));
        }
        if let Some(ref value) = self.lt {
            cond = cond.add(column.lt(value.as_str()));
        }
        if let Some(ref value) = self.lte {
            cond = cond.add(column.lte(value.as_str()));
        }

        if let Some(null_cond) = null_condition(column, self.is_null) {
            cond = cond.add(null_cond);
        }

        cond
    }
}

/// 数值过滤器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberFilter<T> {
    pub equals: Option<T>,
    pub not: Option<T>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<T>>,
    pub not_in: Option<Vec<T>>,
    pub gt: Option<T>,
    pub gte: Option<T>,
    pub lt: Option<T>,
    pub lte: Option<T>,
    /// 仅对可空字段有意义
    pub is_null: Option<bool>,
}

pub type IntFilter = NumberFilter<i64>;
pub type FloatFilter = NumberFilter<f64>;

impl<T> Default for NumberFilter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not: None,
            in_list: None,
            not_in: None,
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            is_null: None,
        }
    }
}

impl<T> NumberFilter<T>
where
    T: Into<Value> + Clone,
{
    pub fn equals(value: T) -> Self {
        Self {
            equals: Some(value),
            ..Default::default()
        }
    }

    pub fn gt(value: T) -> Self {
        Self {
            gt: Some(value),
            ..Default::default()
        }
    }

    pub fn gte(value: T) -> Self {
        Self {
            gte: Some(value),
            ..Default::default()
        }
    }

    pub fn lt(value: T) -> Self {
        Self {
            lt: Some(value),
            ..Default::default()
        }
    }

    pub fn lte(value: T) -> Self {
        Self {
            lte: Some(value),
            ..Default::default()
        }
    }

    /// 闭区间 `[low, high]`
    pub fn between(low: T, high: T) -> Self {
        Self {
            gte: Some(low),
            lte: Some(high),
            ..Default::default()
        }
    }

    pub fn in_list(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            in_list: Some(values.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn is_null(is_null: bool) -> Self {
        Self {
            is_null: Some(is_null),
            ..Default::default()
        }
    }

    pub fn to_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut cond = Condition::all();

        if let Some(ref value) = self.equals {
            cond = cond.add(column.eq(value.clone()));
        }
        if let Some(ref value) = self.not {
            cond = cond.add(column.ne(value.clone()));
        }
        if let Some(ref values) = self.in_list {
            cond = cond.add(column.is_in(values.iter().cloned()));
        }
        if let Some(ref values) = self.not_in {
            cond = cond.add(column.is_not_in(values.iter().cloned()));
        }
        if let Some(ref value) = self.gt {
            cond = cond.add(column.gt(value.clone()));
        }
        if let Some(ref value) = self.gte {
            cond = cond.add(column.gte(value.clone()));
        }
        if let Some(ref value) = self.lt {
            cond = cond.add(column.lt(value.clone()));
        }
        if let Some(ref value) = self.lte {
            cond = cond.add(column.lte(value.clone()));
        }
        if let Some(null_cond) = null_condition(column, self.is_null) {
            cond = cond.add(null_cond);
        }

        cond
    }
}

/// 布尔过滤器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolFilter {
    pub equals: Option<bool>,
    pub not: Option<bool>,
}

impl BoolFilter {
    pub fn to_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut cond = Condition::all();
        if let Some(value) = self.equals {
            cond = cond.add(column.eq(value));
        }
        if let Some(value) = self.not {
            cond = cond.add(column.ne(value));
        }
        cond
    }
}

/// 时间过滤器，按 Unix 秒比较
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateTimeFilter {
    pub equals: Option<DateTime<Utc>>,
    pub not: Option<DateTime<Utc>>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<DateTime<Utc>>>,
    pub not_in: Option<Vec<DateTime<Utc>>>,
    pub gt: Option<DateTime<Utc>>,
    pub gte: Option<DateTime<Utc>>,
    pub lt: Option<DateTime<Utc>>,
    pub lte: Option<DateTime<Utc>>,
    pub is_null: Option<bool>,
}

impl DateTimeFilter {
    pub fn equals(value: DateTime<Utc>) -> Self {
        Self {
            equals: Some(value),
            ..Default::default()
        }
    }

    pub fn gte(value: DateTime<Utc>) -> Self {
        Self {
            gte: Some(value),
            ..Default::default()
        }
    }

    pub fn lt(value: DateTime<Utc>) -> Self {
        Self {
            lt: Some(value),
            ..Default::default()
        }
    }

    /// 半开区间 `[from, to)`
    pub fn range(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            gte: Some(from),
            lt: Some(to),
            ..Default::default()
        }
    }

    pub fn is_null(is_null: bool) -> Self {
        Self {
            is_null: Some(is_null),
            ..Default::default()
        }
    }

    fn as_timestamps(&self) -> IntFilter {
        let ts = |v: &Option<DateTime<Utc>>| v.map(|dt| dt.timestamp());
        let ts_list = |v: &Option<Vec<DateTime<Utc>>>| {
            v.as_ref()
                .map(|list| list.iter().map(|dt| dt.timestamp()).collect())
        };

        IntFilter {
            equals: ts(&self.equals),
            not: ts(&self.not),
            in_list: ts_list(&self.in_list),
            not_in: ts_list(&self.not_in),
            gt: ts(&self.gt),
            gte: ts(&self.gte),
            lt: ts(&self.lt),
            lte: ts(&self.lte),
            is_null: self.is_null,
        }
    }

    pub fn to_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        self.as_timestamps().to_condition(column)
    }
}

/// 枚举过滤器，枚举值以字符串形式存储
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumFilter<T> {
    pub equals: Option<T>,
    pub not: Option<T>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<T>>,
    pub not_in: Option<Vec<T>>,
    pub is_null: Option<bool>,
}

impl<T> Default for EnumFilter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not: None,
            in_list: None,
            not_in: None,
            is_null: None,
        }
    }
}

impl<T: Display> EnumFilter<T> {
    pub fn equals(value: T) -> Self {
        Self {
            equals: Some(value),
            ..Default::default()
        }
    }

    pub fn not(value: T) -> Self {
        Self {
            not: Some(value),
            ..Default::default()
        }
    }

    pub fn in_list(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            in_list: Some(values.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn to_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut cond = Condition::all();
        if let Some(ref value) = self.equals {
            cond = cond.add(column.eq(value.to_string()));
        }
        if let Some(ref value) = self.not {
            cond = cond.add(column.ne(value.to_string()));
        }
        if let Some(ref values) = self.in_list {
            cond = cond.add(column.is_in(values.iter().map(ToString::to_string)));
        }
        if let Some(ref values) = self.not_in {
            cond = cond.add(column.is_not_in(values.iter().map(ToString::to_string)));
        }
        if let Some(null_cond) = null_condition(column, self.is_null) {
            cond = cond.add(null_cond);
        }
        cond
    }
}

/// `SELECT column FROM <column 所在表> WHERE condition`
fn column_subquery<C: ColumnTrait>(column: C, condition: Condition) -> SelectStatement {
    Query::select()
        .column((column.entity_name(), column))
        .from(column.entity_name())
        .cond_where(condition)
        .to_owned()
}

/// 对一关系过滤器（外键指向的记录）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationFilter<W> {
    pub is: Option<Box<W>>,
    pub is_not: Option<Box<W>>,
}

impl<W> Default for RelationFilter<W> {
    fn default() -> Self {
        Self {
            is: None,
            is_not: None,
        }
    }
}

impl<W: WhereInput> RelationFilter<W> {
    pub fn is(filter: W) -> Self {
        Self {
            is: Some(Box::new(filter)),
            is_not: None,
        }
    }

    pub fn is_not(filter: W) -> Self {
        Self {
            is: None,
            is_not: Some(Box::new(filter)),
        }
    }

    /// `foreign_key` 为本表外键列，`target_key` 为关联表主键列
    pub fn to_condition<F, P>(&self, foreign_key: F, target_key: P) -> Condition
    where
        F: ColumnTrait,
        P: ColumnTrait,
    {
        let mut cond = Condition::all();
        if let Some(ref filter) = self.is {
            cond = cond.add(
                foreign_key.in_subquery(column_subquery(target_key, filter.to_condition())),
            );
        }
        if let Some(ref filter) = self.is_not {
            cond = cond.add(
                foreign_key.not_in_subquery(column_subquery(target_key, filter.to_condition())),
            );
        }
        cond
    }
}

/// 对多关系过滤器（引用本记录的子记录集合）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListRelationFilter<W> {
    pub some: Option<Box<W>>,
    pub every: Option<Box<W>>,
    pub none: Option<Box<W>>,
}

impl<W> Default for ListRelationFilter<W> {
    fn default() -> Self {
        Self {
            some: None,
            every: None,
            none: None,
        }
    }
}

impl<W: WhereInput> ListRelationFilter<W> {
    pub fn some(filter: W) -> Self {
        Self {
            some: Some(Box::new(filter)),
            ..Default::default()
        }
    }

    pub fn every(filter: W) -> Self {
        Self {
            every: Some(Box::new(filter)),
            ..Default::default()
        }
    }

    pub fn none(filter: W) -> Self {
        Self {
            none: Some(Box::new(filter)),
            ..Default::default()
        }
    }

    /// `own_key` 为本表主键列，`child_key` 为子表中指向本表的外键列
    pub fn to_condition<P, F>(&self, own_key: P, child_key: F) -> Condition
    where
        P: ColumnTrait,
        F: ColumnTrait,
    {
        let mut cond = Condition::all();

        if let Some(ref filter) = self.some {
            cond = cond.add(own_key.in_subquery(column_subquery(child_key, filter.to_condition())));
        }

        if let Some(ref filter) = self.every {
            // 不存在不满足条件的子记录；空条件恒成立
            let inner = filter.to_condition();
            if !inner.is_empty() {
                cond = cond.add(own_key.not_in_subquery(column_subquery(child_key, inner.not())));
            }
        }

        if let Some(ref filter) = self.none {
            cond = cond.add(
                own_key.not_in_subquery(column_subquery(child_key, filter.to_condition())),
            );
        }

        cond
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::users;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql_for(cond: Condition) -> String {
        users::Entity::find()
            .filter(cond)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_string_filter_equals() {
        let filter = StringFilter::equals("ada@school.edu");
        let sql = sql_for(filter.to_condition(users::Column::Email));
        assert!(sql.contains(r#""users"."email" = 'ada@school.edu'"#), "{sql}");
    }

    #[test]
    fn test_string_filter_escapes_like_wildcards() {
        let sql = sql_for(StringFilter::contains("50%_off").to_condition(users::Column::Username));
        assert!(sql.contains("LIKE"), "{sql}");
        assert!(sql.contains(r"50\%\_off"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
    }

    #[test]
    fn test_string_filter_insensitive_lowers_column() {
        let sql = sql_for(
            StringFilter::starts_with("ADA")
                .insensitive()
                .to_condition(users::Column::FirstName),
        );
        assert!(sql.contains("LOWER"), "{sql}");
        assert!(sql.contains("'ada%'"), "{sql}");
    }

    #[test]
    fn test_empty_filter_adds_nothing() {
        let cond = StringFilter::default().to_condition(users::Column::Email);
        assert!(cond.is_empty());
        assert!(IntFilter::default().to_condition(users::Column::Id).is_empty());
    }

    #[test]
    fn test_number_filter_between() {
        let sql = sql_for(IntFilter::between(10, 20).to_condition(users::Column::Id));
        assert!(sql.contains(r#""users"."id" >= 10"#), "{sql}");
        assert!(sql.contains(r#""users"."id" <= 20"#), "{sql}");
    }

    #[test]
    fn test_nullable_filter() {
        let sql = sql_for(StringFilter::is_null(true).to_condition(users::Column::Phone));
        assert!(sql.contains(r#""users"."phone" IS NULL"#), "{sql}");
    }

    #[test]
    fn test_datetime_filter_compares_timestamps() {
        let from = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let to = DateTime::<Utc>::from_timestamp(1_700_086_400, 0).unwrap();
        let sql = sql_for(DateTimeFilter::range(from, to).to_condition(users::Column::CreatedAt));
        assert!(sql.contains("1700000000"), "{sql}");
        assert!(sql.contains("1700086400"), "{sql}");
    }

    #[test]
    fn test_filter_deserializes_from_json() {
        let filter: StringFilter =
            serde_json::from_str(r#"{"in": ["a", "b"], "mode": "insensitive"}"#).unwrap();
        assert_eq!(filter.in_list, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(filter.mode, QueryMode::Insensitive);

        let filter: IntFilter = serde_json::from_str(r#"{"gte": 3, "notIn": [5]}"#).unwrap();
        assert_eq!(filter.gte, Some(3));
        assert_eq!(filter.not_in, Some(vec![5]));
    }

    async fn seed_teachers_with_classes() -> (crate::client::SchoolClient, [i64; 3]) {
        use crate::models::classes::requests::ClassCreateInput;
        use crate::models::users::entities::Role;
        use crate::testing::{memory_client, seed_class, seed_user};

        let client = memory_client().await;
        let mixed = seed_user(&client, "mixed", Role::Teacher).await;
        let junior = seed_user(&client, "junior", Role::Teacher).await;
        let idle = seed_user(&client, "idle", Role::Teacher).await;

        seed_class(&client, mixed.id, "1A").await;
        client
            .class()
            .create(ClassCreateInput::new("2A", 2, "2024-2025", mixed.id))
            .await
            .unwrap();
        seed_class(&client, junior.id, "1B").await;

        (client, [mixed.id, junior.id, idle.id])
    }

    #[tokio::test]
    async fn test_every_matches_all_children_or_none() {
        use crate::models::classes::requests::ClassWhereInput;
        use crate::models::common::FindManyArgs;
        use crate::models::users::requests::UserWhereInput;

        let (client, [_, junior, idle]) = seed_teachers_with_classes().await;
        let grade_one = ClassWhereInput {
            grade_level: Some(IntFilter::equals(1)),
            ..Default::default()
        };

        let users = client
            .user()
            .find_many(FindManyArgs::new().filter(UserWhereInput {
                classes_taught: Some(ListRelationFilter::every(grade_one.clone())),
                ..Default::default()
            }))
            .await
            .unwrap();
        let ids: Vec<_> = users.iter().map(|u| u.id).collect();
        // 没有任何班级的老师同样满足 every
        assert_eq!(ids, vec![junior, idle]);

        // every 与 some 组合：至少一个且全部满足
        let strict = client
            .user()
            .count(Some(UserWhereInput {
                classes_taught: Some(ListRelationFilter {
                    some: Some(Box::new(grade_one.clone())),
                    every: Some(Box::new(grade_one)),
                    none: None,
                }),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(strict, 1);

        // 空条件的 every 恒成立
        let all = client
            .user()
            .count(Some(UserWhereInput {
                classes_taught: Some(ListRelationFilter::every(ClassWhereInput::default())),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(all, 3);
    }

    #[tokio::test]
    async fn test_relation_is_not_excludes_matching_parent() {
        use crate::models::classes::requests::ClassWhereInput;
        use crate::models::users::requests::UserWhereInput;

        let (client, [_, junior, _]) = seed_teachers_with_classes().await;
        let not_mixed = ClassWhereInput {
            teacher: Some(RelationFilter::is_not(UserWhereInput {
                username: Some(StringFilter::equals("mixed")),
                ..Default::default()
            })),
            ..Default::default()
        };

        let classes = client
            .class()
            .find_many(crate::models::common::FindManyArgs::new().filter(not_mixed))
            .await
            .unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "1B");
        assert_eq!(classes[0].teacher_id, junior);

        let is_mixed = client
            .class()
            .count(Some(ClassWhereInput {
                teacher: Some(RelationFilter::is(UserWhereInput {
                    username: Some(StringFilter::equals("mixed")),
                    ..Default::default()
                })),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(is_mixed, 2);
    }
}
