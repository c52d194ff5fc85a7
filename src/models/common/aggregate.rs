use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// 批量写操作影响的行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPayload {
    pub count: u64,
}

/// 按列名索引的聚合值，空集合上的聚合为 `None`
pub type AggregateValues = BTreeMap<String, Option<f64>>;

/// aggregate 结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(rename = "_count", skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(rename = "_avg", skip_serializing_if = "BTreeMap::is_empty")]
    pub avg: AggregateValues,
    #[serde(rename = "_sum", skip_serializing_if = "BTreeMap::is_empty")]
    pub sum: AggregateValues,
    #[serde(rename = "_min", skip_serializing_if = "BTreeMap::is_empty")]
    pub min: AggregateValues,
    #[serde(rename = "_max", skip_serializing_if = "BTreeMap::is_empty")]
    pub max: AggregateValues,
}

impl AggregateResult {
    pub fn avg_of(&self, column: &str) -> Option<f64> {
        self.avg.get(column).copied().flatten()
    }

    pub fn sum_of(&self, column: &str) -> Option<f64> {
        self.sum.get(column).copied().flatten()
    }

    pub fn min_of(&self, column: &str) -> Option<f64> {
        self.min.get(column).copied().flatten()
    }

    pub fn max_of(&self, column: &str) -> Option<f64> {
        self.max.get(column).copied().flatten()
    }
}

/// groupBy 的一行：分组键加上该组的聚合值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupByRow {
    /// 分组列名到原始值
    pub keys: Map<String, JsonValue>,
    #[serde(flatten)]
    pub aggregates: AggregateResult,
}

impl GroupByRow {
    pub fn key(&self, column: &str) -> Option<&JsonValue> {
        self.keys.get(column)
    }
}
