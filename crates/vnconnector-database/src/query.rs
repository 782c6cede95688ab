//! The query payload accumulated by a [RemoteModel](crate::RemoteModel).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The value side of a [Condition]: a single scalar or an ordered list of scalars, the latter
/// for operators such as `in`.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConditionValue {
    List(Vec<Value>),
    Scalar(Value),
}

impl ConditionValue {
    /// The placeholder matching this value in a raw template, `?` or `(?, ?, ...)`.
    pub fn placeholder(&self) -> String {
        match self {
            ConditionValue::List(items) => format!("({})", vec!["?"; items.len()].join(", ")),
            ConditionValue::Scalar(_) => "?".to_string(),
        }
    }

    /// The values bound to [Self::placeholder], in order.
    pub fn bindings(&self) -> Vec<Value> {
        match self {
            ConditionValue::List(items) => items.clone(),
            ConditionValue::Scalar(value) => vec![value.clone()],
        }
    }
}

impl From<Value> for ConditionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => ConditionValue::List(items),
            other => ConditionValue::Scalar(other),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for ConditionValue {
    fn from(items: Vec<T>) -> Self {
        ConditionValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for ConditionValue {
    fn from(items: [T; N]) -> Self {
        ConditionValue::List(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! scalar_condition_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ConditionValue {
                fn from(value: $t) -> Self {
                    ConditionValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_condition_value!(bool, i32, i64, u32, u64, f64, String, &str);

/// A single filter: `field operator values`.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Condition {
    pub operator: String,
    pub values: ConditionValue,
}

impl Condition {
    #[allow(missing_docs)]
    pub fn new(operator: impl Into<String>, values: impl Into<ConditionValue>) -> Self {
        Self {
            operator: operator.into(),
            values: values.into(),
        }
    }
}

/// A caller-supplied template with positional `?` bindings.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawQuery {
    pub template: String,
    pub binding: Vec<Value>,
}

#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

/// An eager-loaded related table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RelationLink {
    /// Field of the result rows receiving the related data.
    pub field: String,
    /// Remote model queried for the related data.
    pub model: String,
    /// Join condition, a JSON object.
    pub condition: Value,
    /// Columns selected from the related model.
    pub fields: String,
    /// Binding mode of the relation.
    #[serde(rename = "binding")]
    pub binding_mode: bool,
}

impl RelationLink {
    /// A link selecting every column, without binding mode.
    pub fn new(field: impl Into<String>, model: impl Into<String>, condition: Value) -> Self {
        Self {
            field: field.into(),
            model: model.into(),
            condition,
            fields: "*".to_string(),
            binding_mode: false,
        }
    }
}

/// The where-clause of a request: a request carries either a `condition` or a `raw` key, never
/// both.
#[allow(missing_docs)]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum WhereClause {
    #[serde(rename = "condition")]
    Condition(BTreeMap<String, Condition>),
    #[serde(rename = "raw")]
    Raw(RawQuery),
}

/// The part of a request payload produced by
/// [RemoteModel::build_where](crate::RemoteModel::build_where), flattened into every database
/// request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WhereFragment {
    /// Either `condition` or `raw`.
    #[serde(flatten)]
    pub clause: WhereClause,
    /// Omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paginate: Option<Pagination>,
    /// Omitted when unset.
    #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

/// Rows matching a query. `total` counts every matching row, regardless of pagination.
#[allow(missing_docs)]
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    #[serde(default)]
    pub rows: Vec<Value>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_condition_value_from() {
        assert_eq!(ConditionValue::from(5), ConditionValue::Scalar(json!(5)));
        assert_eq!(ConditionValue::from("a"), ConditionValue::Scalar(json!("a")));
        assert_eq!(
            ConditionValue::from(vec![1, 2]),
            ConditionValue::List(vec![json!(1), json!(2)])
        );
        assert_eq!(
            ConditionValue::from(json!(["a", "b"])),
            ConditionValue::List(vec![json!("a"), json!("b")])
        );
        assert_eq!(ConditionValue::from(json!(null)), ConditionValue::Scalar(Value::Null));
    }

    #[test]
    fn test_condition_value_placeholder() {
        assert_eq!(ConditionValue::from(5).placeholder(), "?");
        assert_eq!(ConditionValue::from([1, 2, 3]).placeholder(), "(?, ?, ?)");
        assert_eq!(ConditionValue::from(Vec::<i32>::new()).placeholder(), "()");
    }

    #[test]
    fn test_condition_deserialize() {
        let condition: Condition =
            serde_json::from_value(json!({ "operator": "in", "values": [1, 2] })).unwrap();
        assert_eq!(condition, Condition::new("in", vec![1, 2]));
    }

    #[test]
    fn test_where_fragment_serialization() {
        let fragment = WhereFragment {
            clause: WhereClause::Raw(RawQuery {
                template: "x = ?".to_string(),
                binding: vec![json!(1)],
            }),
            paginate: Some(Pagination {
                page: 2,
                page_size: 10,
            }),
            order_by: None,
        };

        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({
                "raw": { "template": "x = ?", "binding": [1] },
                "paginate": { "page": 2, "pageSize": 10 },
            })
        );
    }

    #[test]
    fn test_relation_link_serialization() {
        let link = RelationLink::new("owner", "User", json!({ "id": "owner_id" }));

        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({
                "field": "owner",
                "model": "User",
                "condition": { "id": "owner_id" },
                "fields": "*",
                "binding": false,
            })
        );
    }
}
