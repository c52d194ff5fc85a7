//! 关联数据批量加载
//!
//! 每个关联按批发 `IN` 查询，再在内存中按外键归组，避免逐条查询。
//! 单条语句的参数个数受后端限制，父记录过多时分批查询。

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::{Result, SchoolError};

#[cfg(not(test))]
const IN_CHUNK_SIZE: usize = 1000;
#[cfg(test)]
const IN_CHUNK_SIZE: usize = 2;

fn unique_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// 加载一对多关联，返回 `外键 -> 子记录列表`
pub(crate) async fn load_many<E, C, T>(
    db: &C,
    foreign_key: E::Column,
    order_key: E::Column,
    parent_ids: impl IntoIterator<Item = i64>,
    key_of: impl Fn(&E::Model) -> i64,
    convert: impl Fn(E::Model) -> T,
    relation: &str,
) -> Result<HashMap<i64, Vec<T>>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let ids = unique_ids(parent_ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    // 同一外键的子记录总在同一批内，批内排序即可
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for chunk in ids.chunks(IN_CHUNK_SIZE) {
        let models = E::find()
            .filter(foreign_key.is_in(chunk.iter().copied()))
            .order_by_asc(order_key)
            .all(db)
            .await
            .map_err(|e| SchoolError::from_db_err(&format!("加载关联{relation}失败"), e))?;

        for model in models {
            grouped.entry(key_of(&model)).or_default().push(convert(model));
        }
    }
    Ok(grouped)
}

/// 加载多对一关联，返回 `主键 -> 记录`
pub(crate) async fn load_one<E, C, T>(
    db: &C,
    primary_key: E::Column,
    ids: impl IntoIterator<Item = i64>,
    key_of: impl Fn(&E::Model) -> i64,
    convert: impl Fn(E::Model) -> T,
    relation: &str,
) -> Result<HashMap<i64, T>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let ids = unique_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut loaded = HashMap::with_capacity(ids.len());
    for chunk in ids.chunks(IN_CHUNK_SIZE) {
        let models = E::find()
            .filter(primary_key.is_in(chunk.iter().copied()))
            .all(db)
            .await
            .map_err(|e| SchoolError::from_db_err(&format!("加载关联{relation}失败"), e))?;
        loaded.extend(models.into_iter().map(|model| (key_of(&model), convert(model))));
    }
    Ok(loaded)
}
