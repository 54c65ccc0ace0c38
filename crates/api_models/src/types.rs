use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A list returned by the backend.
///
/// Collection endpoints answer with a bare array, with the array under `data`, or with the
/// array under a resource named key such as `products` or `items`. All three read the same.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ListResponse<T>(pub Vec<T>);

impl<T> ListResponse<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn find_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                return find_array(data);
            }
            map.into_iter()
                .find_map(|(_, nested)| match nested {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
        }
        _ => None,
    }
}

impl<'de, T> Deserialize<'de> for ListResponse<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let items = find_array(value)
            .ok_or_else(|| serde::de::Error::custom("response does not contain a list"))?;
        items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Acknowledgement body carrying only an optional message
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Badge count, e.g. number of items in the cart
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: u64,
}

impl<'de> Deserialize<'de> for CountResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        const COUNT_KEYS: [&str; 3] = ["count", "total", "totalItems"];

        fn find_count(value: &Value) -> Option<u64> {
            match value {
                Value::Number(number) => number.as_u64(),
                Value::Array(items) => u64::try_from(items.len()).ok(),
                Value::Object(map) => COUNT_KEYS
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_u64))
                    .or_else(|| map.get("data").and_then(find_count)),
                _ => None,
            }
        }

        let value = Value::deserialize(deserializer)?;
        find_count(&value)
            .map(|count| Self { count })
            .ok_or_else(|| serde::de::Error::custom("response does not contain a count"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn lists_read_from_every_envelope() {
        for body in [
            r#"[{"id":1},{"id":2}]"#,
            r#"{"data":[{"id":1},{"id":2}]}"#,
            r#"{"success":true,"products":[{"id":1},{"id":2}]}"#,
            r#"{"data":{"items":[{"id":1},{"id":2}],"page":1}}"#,
        ] {
            let list: ListResponse<Item> = serde_json::from_str(body).unwrap();
            assert_eq!(list.into_inner(), vec![Item { id: 1 }, Item { id: 2 }]);
        }
        assert!(serde_json::from_str::<ListResponse<Item>>(r#"{"message":"x"}"#).is_err());
    }

    #[test]
    fn counts_read_from_every_envelope() {
        for body in [r#"{"count":4}"#, r#"{"data":{"total":4}}"#, "4", "[1,2,3,4]"] {
            let count: CountResponse = serde_json::from_str(body).unwrap();
            assert_eq!(count.count, 4);
        }
    }
}
