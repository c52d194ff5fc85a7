//! 委托共用的查询构建
//!
//! 分页窗口、列投影、聚合与分组都与具体实体无关，这里按 `EntityTrait` 泛型实现。

use sea_orm::sea_query::{Alias, Expr, Func, FunctionCall, SimpleExpr};
use sea_orm::{
    ColumnTrait, ColumnType, Condition, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    IdenStatic, ModelTrait, QueryFilter, QueryOrder, QueryResult, QuerySelect, QueryTrait,
    Select, Value,
};
use serde_json::{Map, Value as JsonValue};

use crate::errors::{Result, SchoolError};
use crate::models::common::{
    AggregateArgs, AggregateResult, GroupByArgs, GroupByRow, OrderByInput, SortOrder,
};

pub(crate) fn same_column<C: ColumnTrait>(a: C, b: C) -> bool {
    a.as_str() == b.as_str()
}

/// 应用排序、游标条件与 skip/take
///
/// 未按主键排序时追加主键升序，保证结果顺序稳定。
pub(crate) fn apply_window<E: EntityTrait>(
    mut select: Select<E>,
    order_by: &[OrderByInput<E::Column>],
    cursor: Option<Condition>,
    skip: Option<u64>,
    take: Option<u64>,
    pk: E::Column,
) -> Select<E> {
    if let Some(cursor) = cursor {
        select = select.filter(cursor);
    }

    for order in order_by {
        select = select.order_by(order.column, order.order.into());
    }
    if !order_by.iter().any(|o| same_column(o.column, pk)) {
        select = select.order_by_asc(pk);
    }

    if let Some(skip) = skip {
        select = select.offset(skip);
    }
    if let Some(take) = take {
        select = select.limit(take);
    }
    select
}

/// 排序键：显式排序列截至主键为止，未出现主键时追加主键升序
fn sort_keys<Col: ColumnTrait>(order_by: &[OrderByInput<Col>], pk: Col) -> Vec<(Col, SortOrder)> {
    let mut keys = Vec::with_capacity(order_by.len() + 1);
    for order in order_by {
        keys.push((order.column, order.order));
        if same_column(order.column, pk) {
            return keys;
        }
    }
    keys.push((pk, SortOrder::Asc));
    keys
}

/// 该方向上 NULL 是否排在非 NULL 之前
///
/// 后端默认：SQLite/MySQL 视 NULL 为最小，Postgres 视为最大。
fn nulls_sort_first(backend: DbBackend, order: SortOrder) -> bool {
    let null_is_smallest = !matches!(backend, DbBackend::Postgres);
    null_is_smallest == (order == SortOrder::Asc)
}

/// 游标行之后（按该列严格排在后面）的记录
fn after_key<Col: ColumnTrait>(
    column: Col,
    order: SortOrder,
    value: &Value,
    inclusive: bool,
    backend: DbBackend,
) -> Condition {
    let nulls_first = nulls_sort_first(backend, order);
    if *value == value.as_null() {
        return if inclusive {
            Condition::all().add(column.is_null())
        } else if nulls_first {
            Condition::all().add(column.is_not_null())
        } else {
            Condition::any()
        };
    }

    let bound = match (order, inclusive) {
        (SortOrder::Asc, false) => column.gt(value.clone()),
        (SortOrder::Asc, true) => column.gte(value.clone()),
        (SortOrder::Desc, false) => column.lt(value.clone()),
        (SortOrder::Desc, true) => column.lte(value.clone()),
    };
    if nulls_first {
        Condition::all().add(bound)
    } else {
        Condition::any().add(bound).add(column.is_null())
    }
}

fn equal_key<Col: ColumnTrait>(column: Col, value: &Value) -> Condition {
    if *value == value.as_null() {
        Condition::all().add(column.is_null())
    } else {
        Condition::all().add(column.eq(value.clone()))
    }
}

/// 由游标行的排序键值构造 keyset 条件
///
/// 结果为游标行本身及按 `order_by`（主键兜底）排在其后的记录。
pub(crate) fn keyset_condition<E: EntityTrait>(
    order_by: &[OrderByInput<E::Column>],
    pk: E::Column,
    model: &E::Model,
    backend: DbBackend,
) -> Condition {
    let keys: Vec<_> = sort_keys(order_by, pk)
        .into_iter()
        .map(|(column, order)| (column, order, model.get(column)))
        .collect();

    let mut condition = Condition::any();
    for (i, (column, order, value)) in keys.iter().enumerate() {
        let mut branch = Condition::all();
        for (prev, _, prev_value) in &keys[..i] {
            branch = branch.add(equal_key(*prev, prev_value));
        }
        // 最后一个键是主键，取等号以包含游标行
        let inclusive = i + 1 == keys.len();
        let after = after_key(*column, *order, value, inclusive, backend);
        condition = condition.add(branch.add(after));
    }
    condition
}

/// 读取游标行并生成游标条件，游标行不存在时结果为空
pub(crate) async fn cursor_condition<E, C>(
    db: &C,
    order_by: &[OrderByInput<E::Column>],
    cursor: Option<i64>,
    pk: E::Column,
    entity: &str,
) -> Result<Option<Condition>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let Some(cursor) = cursor else {
        return Ok(None);
    };
    let model = E::find()
        .filter(pk.eq(cursor))
        .one(db)
        .await
        .map_err(|e| SchoolError::from_db_err(&format!("查询{entity}游标失败"), e))?;

    Ok(Some(match model {
        Some(model) => keyset_condition::<E>(order_by, pk, &model, db.get_database_backend()),
        None => Condition::any(),
    }))
}

/// 按列类型从结果行读取 JSON 值
pub(crate) fn read_json_value(
    row: &QueryResult,
    name: &str,
    column_type: &ColumnType,
) -> std::result::Result<JsonValue, DbErr> {
    let value = match column_type {
        ColumnType::TinyInteger | ColumnType::SmallInteger | ColumnType::Integer => row
            .try_get::<Option<i32>>("", name)?
            .map(JsonValue::from),
        ColumnType::BigInteger => row.try_get::<Option<i64>>("", name)?.map(JsonValue::from),
        ColumnType::Float | ColumnType::Double => {
            row.try_get::<Option<f64>>("", name)?.map(JsonValue::from)
        }
        ColumnType::Boolean => row.try_get::<Option<bool>>("", name)?.map(JsonValue::from),
        ColumnType::Json | ColumnType::JsonBinary => row.try_get::<Option<JsonValue>>("", name)?,
        _ => row
            .try_get::<Option<String>>("", name)?
            .map(JsonValue::from),
    };
    Ok(value.unwrap_or(JsonValue::Null))
}

fn read_columns<Col: ColumnTrait>(
    row: &QueryResult,
    columns: &[Col],
) -> std::result::Result<Map<String, JsonValue>, DbErr> {
    let mut map = Map::new();
    for column in columns {
        let def = column.def();
        let value = read_json_value(row, column.as_str(), def.get_column_type())?;
        map.insert(column.as_str().to_string(), value);
    }
    Ok(map)
}

/// 只查询指定列，每行返回一个 JSON 对象
pub(crate) async fn select_columns<E, C>(
    db: &C,
    select: Select<E>,
    columns: &[E::Column],
    entity: &str,
) -> Result<Vec<JsonValue>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if columns.is_empty() {
        return Err(SchoolError::validation(format!(
            "{entity} 投影查询至少需要一列"
        )));
    }

    let mut select = select.select_only();
    for column in columns {
        select = select.column(*column);
    }

    let stmt = select.build(db.get_database_backend());
    let rows = db
        .query_all_raw(stmt)
        .await
        .map_err(|e| SchoolError::from_db_err(&format!("查询{entity}列失败"), e))?;

    rows.iter()
        .map(|row| {
            read_columns(row, columns)
                .map(JsonValue::Object)
                .map_err(|e| SchoolError::from_db_err(&format!("读取{entity}列失败"), e))
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum AggregateFn {
    Avg,
    Sum,
    Min,
    Max,
}

impl AggregateFn {
    fn prefix(self) -> &'static str {
        match self {
            AggregateFn::Avg => "_avg",
            AggregateFn::Sum => "_sum",
            AggregateFn::Min => "_min",
            AggregateFn::Max => "_max",
        }
    }

    fn call(self, expr: Expr) -> FunctionCall {
        match self {
            AggregateFn::Avg => Func::avg(expr),
            AggregateFn::Sum => Func::sum(expr),
            AggregateFn::Min => Func::min(expr),
            AggregateFn::Max => Func::max(expr),
        }
    }
}

fn alias_for<Col: ColumnTrait>(func: AggregateFn, column: Col) -> String {
    format!("{}_{}", func.prefix(), column.as_str())
}

/// 聚合结果统一转成浮点，各后端的 SUM/AVG 返回类型不一致
fn double_type(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::MySql => "DOUBLE",
        _ => "DOUBLE PRECISION",
    }
}

/// 一次查询需要计算的聚合
pub(crate) struct AggregatePlan<'a, Col> {
    pub count: bool,
    pub avg: &'a [Col],
    pub sum: &'a [Col],
    pub min: &'a [Col],
    pub max: &'a [Col],
}

impl<'a, Col: ColumnTrait> AggregatePlan<'a, Col> {
    pub fn from_aggregate<W>(args: &'a AggregateArgs<W, Col>) -> Self {
        Self {
            count: args.count,
            avg: &args.avg,
            sum: &args.sum,
            min: &args.min,
            max: &args.max,
        }
    }

    pub fn from_group_by<W>(args: &'a GroupByArgs<W, Col>) -> Self {
        Self {
            count: args.count,
            avg: &args.avg,
            sum: &args.sum,
            min: &args.min,
            max: &args.max,
        }
    }

    fn functions(&self) -> [(AggregateFn, &'a [Col]); 4] {
        [
            (AggregateFn::Avg, self.avg),
            (AggregateFn::Sum, self.sum),
            (AggregateFn::Min, self.min),
            (AggregateFn::Max, self.max),
        ]
    }

    fn is_empty(&self) -> bool {
        !self.count && self.functions().iter().all(|(_, cols)| cols.is_empty())
    }

    /// avg/sum/min/max 只允许数值列
    fn validate(&self, numeric: &[Col], entity: &str) -> Result<()> {
        for (func, columns) in self.functions() {
            for column in columns {
                if !numeric.iter().any(|n| same_column(*n, *column)) {
                    return Err(SchoolError::validation(format!(
                        "{entity}.{} 不是数值列，不能计算 {}",
                        column.as_str(),
                        func.prefix()
                    )));
                }
            }
        }
        Ok(())
    }

    fn apply<E>(&self, mut select: Select<E>, backend: DbBackend, pk: Col) -> Select<E>
    where
        E: EntityTrait<Column = Col>,
    {
        if self.count {
            select = select.column_as(
                SimpleExpr::from(Func::count(Expr::col((pk.entity_name(), pk)))),
                "_count",
            );
        }
        for (func, columns) in self.functions() {
            for column in columns {
                let call = func.call(Expr::col((column.entity_name(), *column)));
                select = select.column_as(
                    SimpleExpr::from(Func::cast_as(call, Alias::new(double_type(backend)))),
                    alias_for(func, *column),
                );
            }
        }
        select
    }

    fn read(&self, row: &QueryResult) -> std::result::Result<AggregateResult, DbErr> {
        let mut result = AggregateResult::default();
        if self.count {
            result.count = Some(row.try_get::<Option<i64>>("", "_count")?.unwrap_or(0));
        }
        for (func, columns) in self.functions() {
            let target = match func {
                AggregateFn::Avg => &mut result.avg,
                AggregateFn::Sum => &mut result.sum,
                AggregateFn::Min => &mut result.min,
                AggregateFn::Max => &mut result.max,
            };
            for column in columns {
                let value = row.try_get::<Option<f64>>("", &alias_for(func, *column))?;
                target.insert(column.as_str().to_string(), value);
            }
        }
        Ok(result)
    }
}

/// 对过滤后的全部记录计算聚合
pub(crate) async fn aggregate<E, C>(
    db: &C,
    condition: Condition,
    plan: AggregatePlan<'_, E::Column>,
    pk: E::Column,
    numeric: &[E::Column],
    entity: &str,
) -> Result<AggregateResult>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    plan.validate(numeric, entity)?;
    if plan.is_empty() {
        return Ok(AggregateResult::default());
    }

    let backend = db.get_database_backend();
    let select = plan.apply(E::find().select_only().filter(condition), backend, pk);

    let row = db
        .query_one_raw(select.build(backend))
        .await
        .map_err(|e| SchoolError::from_db_err(&format!("聚合{entity}失败"), e))?;

    match row {
        Some(row) => plan
            .read(&row)
            .map_err(|e| SchoolError::from_db_err(&format!("读取{entity}聚合结果失败"), e)),
        None => Ok(AggregateResult::default()),
    }
}

/// 按 `by` 列分组并计算每组聚合
pub(crate) async fn group_by<E, C, W>(
    db: &C,
    args: &GroupByArgs<W, E::Column>,
    condition: Condition,
    pk: E::Column,
    numeric: &[E::Column],
    entity: &str,
) -> Result<Vec<GroupByRow>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if args.by.is_empty() {
        return Err(SchoolError::validation(format!(
            "{entity} 分组至少需要一列"
        )));
    }
    for order in &args.order_by {
        if !args.by.iter().any(|b| same_column(*b, order.column)) {
            return Err(SchoolError::validation(format!(
                "{entity}.{} 不在分组列中，不能用于排序",
                order.column.as_str()
            )));
        }
    }

    let plan = AggregatePlan::from_group_by(args);
    plan.validate(numeric, entity)?;

    let backend = db.get_database_backend();
    let mut select = E::find().select_only().filter(condition);
    for column in &args.by {
        select = select.column(*column).group_by(*column);
    }
    select = plan.apply(select, backend, pk);

    if args.order_by.is_empty() {
        for column in &args.by {
            select = select.order_by_asc(*column);
        }
    } else {
        for order in &args.order_by {
            select = select.order_by(order.column, order.order.into());
        }
    }
    if let Some(skip) = args.skip {
        select = select.offset(skip);
    }
    if let Some(take) = args.take {
        select = select.limit(take);
    }

    let rows = db
        .query_all_raw(select.build(backend))
        .await
        .map_err(|e| SchoolError::from_db_err(&format!("分组统计{entity}失败"), e))?;

    rows.iter()
        .map(|row| {
            let keys = read_columns(row, &args.by)?;
            let aggregates = plan.read(row)?;
            Ok(GroupByRow { keys, aggregates })
        })
        .collect::<std::result::Result<Vec<_>, DbErr>>()
        .map_err(|e| SchoolError::from_db_err(&format!("读取{entity}分组结果失败"), e))
}
