//! Evaluator for filter expressions against feature properties.

use super::ast::FilterExpression;
use serde_json::{Map, Value};

/// Evaluate a filter expression against a feature's properties.
///
/// A property that is absent reads as `null`, so it never equals a string
/// and never satisfies a numeric comparison.
pub fn evaluate(expr: &FilterExpression, properties: &Map<String, Value>) -> bool {
    match expr {
        FilterExpression::Eq { property, value } => lookup(properties, property) == value,

        FilterExpression::In { property, values } => match lookup(properties, property) {
            Value::String(actual) => values.iter().any(|v| v == actual),
            _ => false,
        },

        FilterExpression::Ge { property, value } => {
            lookup(properties, property).as_f64().is_some_and(|actual| actual >= *value)
        }

        FilterExpression::Lt { property, value } => {
            lookup(properties, property).as_f64().is_some_and(|actual| actual < *value)
        }

        FilterExpression::All(exprs) => exprs.iter().all(|e| evaluate(e, properties)),

        FilterExpression::Any(exprs) => exprs.iter().any(|e| evaluate(e, properties)),
    }
}

fn lookup<'a>(properties: &'a Map<String, Value>, key: &str) -> &'a Value {
    properties.get(key).unwrap_or(&Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_equality() {
        let expr = FilterExpression::equals("tree_type", "park");
        assert!(evaluate(&expr, &props(json!({"tree_type": "park"}))));
        assert!(!evaluate(&expr, &props(json!({"tree_type": "roadside"}))));
        assert!(!evaluate(&expr, &props(json!({}))));
    }

    #[test]
    fn test_membership() {
        let expr = FilterExpression::is_in("species_kr", vec!["은행나무".into(), "벚나무".into()]);
        assert!(evaluate(&expr, &props(json!({"species_kr": "벚나무"}))));
        assert!(!evaluate(&expr, &props(json!({"species_kr": "느티나무"}))));
        assert!(!evaluate(&expr, &props(json!({"species_kr": 3}))));
    }

    #[test]
    fn test_half_open_range() {
        let expr = FilterExpression::All(vec![
            FilterExpression::ge("dbh_cm", 15.0),
            FilterExpression::lt("dbh_cm", 30.0),
        ]);
        assert!(evaluate(&expr, &props(json!({"dbh_cm": 15}))));
        assert!(evaluate(&expr, &props(json!({"dbh_cm": 29.9}))));
        assert!(!evaluate(&expr, &props(json!({"dbh_cm": 30}))));
        assert!(!evaluate(&expr, &props(json!({"dbh_cm": "20"}))));
    }

    #[test]
    fn test_empty_groups() {
        let empty = props(json!({}));
        assert!(evaluate(&FilterExpression::All(vec![]), &empty));
        assert!(!evaluate(&FilterExpression::Any(vec![]), &empty));
    }
}
