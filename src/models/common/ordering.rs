use serde::{Deserialize, Serialize};

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<SortOrder> for sea_orm::Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        }
    }
}

/// 单列排序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderByInput<C> {
    pub column: C,
    pub order: SortOrder,
}

impl<C> OrderByInput<C> {
    pub fn asc(column: C) -> Self {
        Self {
            column,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(column: C) -> Self {
        Self {
            column,
            order: SortOrder::Desc,
        }
    }
}
