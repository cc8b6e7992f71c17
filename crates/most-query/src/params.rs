//! Wire parameters projected from a query.

use serde::Serialize;

/// The request parameters of a query.
///
/// Serializes to exactly the `$`-prefixed wire keys, omitting every field
/// that is not populated. `model` and `array` describe the request target
/// and the expected result shape; they are never sent as parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryParams {
    /// The target model.
    #[serde(skip)]
    pub model: String,
    /// Result shape hint: a bare array instead of a wrapped object.
    #[serde(skip)]
    pub array: Option<bool>,
    /// `$filter`
    #[serde(rename = "$filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// `$select`
    #[serde(rename = "$select", skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    /// `$groupby`
    #[serde(rename = "$groupby", skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    /// `$orderby`
    #[serde(rename = "$orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// `$expand`
    #[serde(rename = "$expand", skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    /// `$top` (`-1` = no limit)
    #[serde(rename = "$top", skip_serializing_if = "Option::is_none")]
    pub top: Option<i64>,
    /// `$skip`
    #[serde(rename = "$skip", skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// `$inlinecount`
    #[serde(rename = "$inlinecount", skip_serializing_if = "Option::is_none")]
    pub inline_count: Option<bool>,
}

impl QueryParams {
    /// Returns the wire parameters as ordered `(name, value)` pairs.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((name, value));
            }
        };
        push("$filter", self.filter.clone());
        push("$select", self.select.clone());
        push("$groupby", self.group_by.clone());
        push("$orderby", self.order_by.clone());
        push("$expand", self.expand.clone());
        push("$top", self.top.map(|top| top.to_string()));
        push("$skip", self.skip.map(|skip| skip.to_string()));
        push("$inlinecount", self.inline_count.map(|flag| flag.to_string()));
        pairs
    }

    /// Returns true if no wire parameter is populated.
    pub fn is_empty(&self) -> bool {
        self.to_pairs().is_empty()
    }

    /// Sets `$top` unless the query already set it.
    pub fn with_default_top(mut self, top: i64) -> Self {
        self.top.get_or_insert(top);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> QueryParams {
        QueryParams {
            model: "Person".to_string(),
            filter: Some("age gt 18".to_string()),
            order_by: Some("name,age desc".to_string()),
            top: Some(25),
            skip: Some(50),
            inline_count: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_serialize_omits_unpopulated() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "$filter": "age gt 18",
                "$orderby": "name,age desc",
                "$top": 25,
                "$skip": 50,
                "$inlinecount": true
            })
        );
    }

    #[test]
    fn test_serialize_empty() {
        let value = serde_json::to_value(QueryParams::default()).unwrap();
        assert_eq!(value, json!({}));
        assert!(QueryParams::default().is_empty());
    }

    #[test]
    fn test_to_pairs_order() {
        let names: Vec<_> = sample().to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["$filter", "$orderby", "$top", "$skip", "$inlinecount"]);
    }

    #[test]
    fn test_with_default_top() {
        let params = QueryParams::default().with_default_top(25);
        assert_eq!(params.top, Some(25));
        let params = sample().with_default_top(10);
        assert_eq!(params.top, Some(25));
    }
}
