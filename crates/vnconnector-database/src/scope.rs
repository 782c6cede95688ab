use std::{collections::BTreeMap, fmt};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

use crate::{Condition, ConditionValue, RawQuery};

/// Ambient parameters: scope filters fixed when a model is created and merged into every
/// request it sends.
///
/// The SSO rule set delivers them as a JSON object, `{"field": {"operator": "=", "values": 5}}`.
/// Key order is kept, it decides the order of the clauses appended to raw queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeParams(Vec<(String, Condition)>);

impl ScopeParams {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON object delivered by the SSO rule set. An empty string or `null` yields no
    /// parameters.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_json::from_str::<Option<Self>>(json)?.unwrap_or_default())
    }

    /// Add a parameter. Setting a field twice keeps its first position and the last value.
    pub fn with(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        values: impl Into<ConditionValue>,
    ) -> Self {
        self.insert(field.into(), Condition::new(operator, values));
        self
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.0.iter().map(|(field, condition)| (field.as_str(), condition))
    }

    fn insert(&mut self, field: String, condition: Condition) {
        match self.0.iter_mut().find(|(existing, _)| *existing == field) {
            Some((_, existing)) => *existing = condition,
            None => self.0.push((field, condition)),
        }
    }

    /// Add the parameters to a condition map, replacing any condition on the same field.
    pub(crate) fn merge_into_condition(&self, condition: &mut BTreeMap<String, Condition>) {
        for (field, scope) in self.iter() {
            condition.insert(field.to_owned(), scope.clone());
        }
    }

    /// Append one ` AND field operator placeholder` clause per parameter to a raw query.
    pub(crate) fn merge_into_raw(&self, raw: &mut RawQuery) {
        for (field, scope) in self.iter() {
            raw.template.push_str(&format!(
                " AND {field} {} {}",
                scope.operator,
                scope.values.placeholder()
            ));
            raw.binding.extend(scope.values.bindings());
        }
    }
}

impl<'de> Deserialize<'de> for ScopeParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScopeVisitor;

        impl<'de> Visitor<'de> for ScopeVisitor {
            type Value = ScopeParams;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of field names to conditions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut params = ScopeParams::default();
                while let Some((field, condition)) = map.next_entry::<String, Condition>()? {
                    params.insert(field, condition);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ScopeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_keeps_key_order() {
        let params = ScopeParams::from_json(
            r#"{"zone": {"operator": "=", "values": 5}, "area": {"operator": "in", "values": [1, 2]}}"#,
        )
        .unwrap();

        let fields: Vec<_> = params.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["zone", "area"]);
        assert_eq!(
            params,
            ScopeParams::new()
                .with("zone", "=", 5)
                .with("area", "in", vec![1, 2])
        );
    }

    #[test]
    fn test_from_json_empty() {
        assert!(ScopeParams::from_json("").unwrap().is_empty());
        assert!(ScopeParams::from_json("null").unwrap().is_empty());
        assert!(ScopeParams::from_json("{}").unwrap().is_empty());
        assert!(ScopeParams::from_json("[1]").is_err());
        assert!(ScopeParams::from_json(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_duplicate_field_keeps_position() {
        let params = ScopeParams::new()
            .with("a", "=", 1)
            .with("b", "=", 2)
            .with("a", ">", 3);

        let entries: Vec<_> = params.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("a", &Condition::new(">", 3)),
                ("b", &Condition::new("=", 2)),
            ]
        );
    }

    #[test]
    fn test_merge_into_raw() {
        let params = ScopeParams::new()
            .with("a", "=", 5)
            .with("b", "in", vec!["x", "y"]);
        let mut raw = RawQuery {
            template: "x = 1".to_string(),
            binding: vec![],
        };

        params.merge_into_raw(&mut raw);

        assert_eq!(raw.template, "x = 1 AND a = ? AND b in (?, ?)");
        assert_eq!(raw.binding, vec![json!(5), json!("x"), json!("y")]);
    }

    #[test]
    fn test_merge_into_condition_replaces_existing_fields() {
        let params = ScopeParams::new().with("a", "=", 5).with("b", "=", 6);
        let mut condition = BTreeMap::from([
            ("a".to_string(), Condition::new("<", 1)),
            ("c".to_string(), Condition::new(">", 2)),
        ]);

        params.merge_into_condition(&mut condition);

        assert_eq!(condition["a"], Condition::new("=", 5));
        assert_eq!(condition["b"], Condition::new("=", 6));
        assert_eq!(condition["c"], Condition::new(">", 2));
    }
}
