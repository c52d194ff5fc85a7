use serde::{Deserialize, Deserializer};

/// 区分字段缺省与显式 null
///
/// 配合 `#[serde(default)]` 使用：缺省为 `None`，`null` 为 `Some(None)`。
pub fn deserialize_nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Patch {
        #[serde(deserialize_with = "super::deserialize_nullable")]
        phone: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.phone, None);

        let cleared: Patch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(cleared.phone, Some(None));

        let set: Patch = serde_json::from_str(r#"{"phone": "555-0100"}"#).unwrap();
        assert_eq!(set.phone, Some(Some("555-0100".to_string())));
    }
}
