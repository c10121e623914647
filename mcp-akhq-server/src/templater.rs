//! Endpoint templating
//!
//! Turns an endpoint template such as `/api/{cluster}/topic/{topicName}/data`
//! plus a parameter set into the final request path. Parameters named by a
//! placeholder are substituted into the path, everything else (except the
//! reserved `body` key and null values) is serialized into the query string.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Key carrying the request payload; never path or query data.
pub const BODY_KEY: &str = "body";

/// Characters left untouched by URL component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Templating errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{name}` placeholder had no value (absent or null)
    #[error("Missing required parameter: {0}")]
    MissingPathParameter(String),
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"))
}

/// Names of all placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Resolve `template` against `parameters` into a path with optional query string.
pub fn resolve_endpoint(template: &str, parameters: &Map<String, Value>) -> Result<String, TemplateError> {
    let mut path = String::with_capacity(template.len());
    let mut path_params = HashSet::new();
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();

        let value = match parameters.get(name) {
            None | Some(Value::Null) => {
                return Err(TemplateError::MissingPathParameter(name.to_string()))
            }
            Some(value) => value,
        };

        path.push_str(&template[last..whole.start()]);
        path.push_str(&encode_component(&value_to_string(value)));
        path_params.insert(name);
        last = whole.end();
    }
    path.push_str(&template[last..]);

    let mut pairs = Vec::new();
    for (key, value) in parameters {
        if key == BODY_KEY || path_params.contains(key.as_str()) {
            continue;
        }

        match value {
            Value::Null => {}
            Value::Array(items) => {
                let key = encode_component(key);
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push(format!("{}={}", key, encode_component(&value_to_string(item))));
                }
            }
            scalar => pairs.push(format!(
                "{}={}",
                encode_component(key),
                encode_component(&value_to_string(scalar))
            )),
        }
    }

    if !pairs.is_empty() {
        path.push('?');
        path.push_str(&pairs.join("&"));
    }

    Ok(path)
}

/// String form of a parameter value as it appears in a URL.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_single_placeholder() {
        let path = resolve_endpoint("/api/{cluster}/node", &params(json!({"cluster": "prod"}))).unwrap();
        assert_eq!(path, "/api/prod/node");
    }

    #[test]
    fn test_placeholder_is_encoded() {
        let path = resolve_endpoint(
            "/api/{cluster}/topic/{topicName}",
            &params(json!({"cluster": "a b", "topicName": "orders/{eu}?é"})),
        )
        .unwrap();
        assert_eq!(path, "/api/a%20b/topic/orders%2F%7Beu%7D%3F%C3%A9");
        assert!(!path.contains('?'));
    }

    #[test]
    fn test_unreserved_characters_kept() {
        let path = resolve_endpoint("/api/{x}", &params(json!({"x": "a-b_c.d!e~f*g'h(i)"}))).unwrap();
        assert_eq!(path, "/api/a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn test_missing_path_parameter() {
        let err = resolve_endpoint(
            "/api/{cluster}/topic/{topicName}",
            &params(json!({"cluster": "local", "search": "x"})),
        )
        .unwrap_err();
        assert_eq!(err, TemplateError::MissingPathParameter("topicName".to_string()));
        assert_eq!(err.to_string(), "Missing required parameter: topicName");
    }

    #[test]
    fn test_null_path_parameter_is_missing() {
        let err = resolve_endpoint("/api/{cluster}/topic", &params(json!({"cluster": null}))).unwrap_err();
        assert_eq!(err, TemplateError::MissingPathParameter("cluster".to_string()));
    }

    #[test]
    fn test_first_missing_placeholder_reported() {
        let err = resolve_endpoint("/api/{cluster}/group/{groupName}", &Map::new()).unwrap_err();
        assert_eq!(err, TemplateError::MissingPathParameter("cluster".to_string()));
    }

    #[test]
    fn test_path_parameter_not_repeated_in_query() {
        let path = resolve_endpoint(
            "/api/{cluster}/topic",
            &params(json!({"cluster": ["x", "y"], "page": 2})),
        )
        .unwrap();
        assert_eq!(path, "/api/x%2Cy/topic?page=2");
    }

    #[test]
    fn test_array_query_parameter_repeats_key() {
        let path = resolve_endpoint(
            "/api/{cluster}/topic",
            &params(json!({"cluster": "c1", "topics": ["a", "b"]})),
        )
        .unwrap();
        assert_eq!(path, "/api/c1/topic?topics=a&topics=b");
    }

    #[test]
    fn test_null_query_parameter_omitted() {
        let path = resolve_endpoint(
            "/api/{cluster}/topic",
            &params(json!({"cluster": "c1", "search": null})),
        )
        .unwrap();
        assert_eq!(path, "/api/c1/topic");
    }

    #[test]
    fn test_numeric_path_parameters() {
        let path = resolve_endpoint(
            "/api/{cluster}/topic/{topicName}/data/record/{partition}/{offset}",
            &params(json!({"cluster": "local", "topicName": "t", "partition": 0, "offset": 42})),
        )
        .unwrap();
        assert_eq!(path, "/api/local/topic/t/data/record/0/42");
    }

    #[test]
    fn test_query_order_and_scalar_forms() {
        let path = resolve_endpoint(
            "/api/{cluster}/topic/{topicName}/data",
            &params(json!({
                "cluster": "local",
                "topicName": "t",
                "after": "abc",
                "partition": 0,
                "sort": "NEWEST",
                "ratio": 1.5,
                "keyOnly": false
            })),
        )
        .unwrap();
        assert_eq!(
            path,
            "/api/local/topic/t/data?after=abc&partition=0&sort=NEWEST&ratio=1.5&keyOnly=false"
        );
    }

    #[test]
    fn test_body_never_in_query() {
        let path = resolve_endpoint(
            "/api/{cluster}/topic",
            &params(json!({"cluster": "c1", "body": {"name": "t"}})),
        )
        .unwrap();
        assert_eq!(path, "/api/c1/topic");
    }

    #[test]
    fn test_query_keys_and_values_encoded() {
        let path = resolve_endpoint(
            "/api/cluster",
            &params(json!({"search key": "a&b=c", "list": ["x y", "z"]})),
        )
        .unwrap();
        assert_eq!(path, "/api/cluster?search%20key=a%26b%3Dc&list=x%20y&list=z");
    }

    #[test]
    fn test_empty_array_emits_nothing() {
        let path = resolve_endpoint("/api/{cluster}/tail/sse", &params(json!({"cluster": "c", "topics": []}))).unwrap();
        assert_eq!(path, "/api/c/tail/sse");
    }

    #[test]
    fn test_no_placeholders_no_parameters() {
        let path = resolve_endpoint("/api/cluster", &Map::new()).unwrap();
        assert_eq!(path, "/api/cluster");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let input = params(json!({"cluster": "c1", "topics": ["a", "b"], "search": "x"}));
        let first = resolve_endpoint("/api/{cluster}/tail/sse", &input).unwrap();
        let second = resolve_endpoint("/api/{cluster}/tail/sse", &input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_placeholders_listed_in_order() {
        assert_eq!(
            placeholders("/api/{cluster}/topic/{topicName}/data/record/{partition}/{offset}"),
            vec!["cluster", "topicName", "partition", "offset"]
        );
        assert!(placeholders("/api/cluster").is_empty());
    }
}
