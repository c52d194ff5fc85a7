//! 查询参数包装
//!
//! `W` 为 where 输入，`C` 为列枚举，`I` 为关联加载标志，`U` 为唯一选择器。

use super::ordering::OrderByInput;

/// findMany / findFirst 参数
#[derive(Debug, Clone)]
pub struct FindManyArgs<W, C, I> {
    pub filter: Option<W>,
    pub order_by: Vec<OrderByInput<C>>,
    /// 游标为主键值，结果从该记录（含）开始
    pub cursor: Option<i64>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub include: Option<I>,
}

impl<W, C, I> Default for FindManyArgs<W, C, I> {
    fn default() -> Self {
        Self {
            filter: None,
            order_by: Vec::new(),
            cursor: None,
            skip: None,
            take: None,
            include: None,
        }
    }
}

impl<W, C, I> FindManyArgs<W, C, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: W) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, order: OrderByInput<C>) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn cursor(mut self, id: i64) -> Self {
        self.cursor = Some(id);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn include(mut self, include: I) -> Self {
        self.include = Some(include);
        self
    }
}

/// findUnique 参数
#[derive(Debug, Clone)]
pub struct FindUniqueArgs<U, I> {
    pub filter: U,
    pub include: Option<I>,
}

impl<U, I> FindUniqueArgs<U, I> {
    pub fn new(filter: U) -> Self {
        Self {
            filter,
            include: None,
        }
    }

    pub fn include(mut self, include: I) -> Self {
        self.include = Some(include);
        self
    }
}

impl<U, I> From<U> for FindUniqueArgs<U, I> {
    fn from(filter: U) -> Self {
        Self::new(filter)
    }
}

/// createMany 参数
#[derive(Debug, Clone)]
pub struct CreateManyArgs<D> {
    pub data: Vec<D>,
    /// 跳过违反唯一约束的行
    pub skip_duplicates: bool,
}

impl<D> CreateManyArgs<D> {
    pub fn new(data: Vec<D>) -> Self {
        Self {
            data,
            skip_duplicates: false,
        }
    }

    pub fn skip_duplicates(mut self) -> Self {
        self.skip_duplicates = true;
        self
    }
}

impl<D> From<Vec<D>> for CreateManyArgs<D> {
    fn from(data: Vec<D>) -> Self {
        Self::new(data)
    }
}

/// upsert 参数
#[derive(Debug, Clone)]
pub struct UpsertArgs<U, Cr, Up> {
    pub filter: U,
    pub create: Cr,
    pub update: Up,
}

impl<U, Cr, Up> UpsertArgs<U, Cr, Up> {
    pub fn new(filter: U, create: Cr, update: Up) -> Self {
        Self {
            filter,
            create,
            update,
        }
    }
}

/// aggregate 参数，avg/sum/min/max 只接受数值列
#[derive(Debug, Clone)]
pub struct AggregateArgs<W, C> {
    pub filter: Option<W>,
    pub count: bool,
    pub avg: Vec<C>,
    pub sum: Vec<C>,
    pub min: Vec<C>,
    pub max: Vec<C>,
}

impl<W, C> Default for AggregateArgs<W, C> {
    fn default() -> Self {
        Self {
            filter: None,
            count: false,
            avg: Vec::new(),
            sum: Vec::new(),
            min: Vec::new(),
            max: Vec::new(),
        }
    }
}

impl<W, C> AggregateArgs<W, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: W) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    pub fn avg(mut self, column: C) -> Self {
        self.avg.push(column);
        self
    }

    pub fn sum(mut self, column: C) -> Self {
        self.sum.push(column);
        self
    }

    pub fn min(mut self, column: C) -> Self {
        self.min.push(column);
        self
    }

    pub fn max(mut self, column: C) -> Self {
        self.max.push(column);
        self
    }
}

/// groupBy 参数，`order_by` 的列必须出现在 `by` 中
#[derive(Debug, Clone)]
pub struct GroupByArgs<W, C> {
    pub by: Vec<C>,
    pub filter: Option<W>,
    pub order_by: Vec<OrderByInput<C>>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub count: bool,
    pub avg: Vec<C>,
    pub sum: Vec<C>,
    pub min: Vec<C>,
    pub max: Vec<C>,
}

impl<W, C> GroupByArgs<W, C> {
    pub fn new(by: Vec<C>) -> Self {
        Self {
            by,
            filter: None,
            order_by: Vec::new(),
            skip: None,
            take: None,
            count: false,
            avg: Vec::new(),
            sum: Vec::new(),
            min: Vec::new(),
            max: Vec::new(),
        }
    }

    pub fn filter(mut self, filter: W) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, order: OrderByInput<C>) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    pub fn avg(mut self, column: C) -> Self {
        self.avg.push(column);
        self
    }

    pub fn sum(mut self, column: C) -> Self {
        self.sum.push(column);
        self
    }

    pub fn min(mut self, column: C) -> Self {
        self.min.push(column);
        self
    }

    pub fn max(mut self, column: C) -> Self {
        self.max.push(column);
        self
    }
}
