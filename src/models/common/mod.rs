//! 各实体共用的查询参数与结果类型

pub mod aggregate;
pub mod args;
mod expr;
pub mod filters;
pub mod nullable;
pub mod ordering;
pub mod pagination;

pub use aggregate::{AggregateResult, BatchPayload, GroupByRow};
pub use args::{
    AggregateArgs, CreateManyArgs, FindManyArgs, FindUniqueArgs, GroupByArgs, UpsertArgs,
};
pub use filters::{
    BoolFilter, DateTimeFilter, EnumFilter, FloatFilter, IntFilter, ListRelationFilter,
    NumberFilter, QueryMode, RelationFilter, StringFilter, WhereInput, combine_logical,
};
pub use ordering::{OrderByInput, SortOrder};
pub use pagination::{PaginatedResponse, PaginationInfo};
