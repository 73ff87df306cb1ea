//! AST types for map style filter expressions.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use std::fmt;

/// A boolean filter expression in Mapbox GL style-spec form.
///
/// Property access is always `['get', <property>]`, so the property name is
/// stored directly on each comparison node.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// `['==', ['get', property], value]`
    Eq { property: String, value: Value },

    /// `['in', ['get', property], ['literal', values]]`
    In { property: String, values: Vec<String> },

    /// `['>=', ['get', property], value]`
    Ge { property: String, value: f64 },

    /// `['<', ['get', property], value]`
    Lt { property: String, value: f64 },

    /// `['all', ...]`
    All(Vec<FilterExpression>),

    /// `['any', ...]`
    Any(Vec<FilterExpression>),
}

/// Expression operator, as it appears in the first slot of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    In,
    Ge,
    Lt,
    All,
    Any,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "=="),
            Operator::In => write!(f, "in"),
            Operator::Ge => write!(f, ">="),
            Operator::Lt => write!(f, "<"),
            Operator::All => write!(f, "all"),
            Operator::Any => write!(f, "any"),
        }
    }
}

impl FilterExpression {
    pub fn equals(property: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterExpression::Eq {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn is_in(property: impl Into<String>, values: Vec<String>) -> Self {
        FilterExpression::In {
            property: property.into(),
            values,
        }
    }

    pub fn ge(property: impl Into<String>, value: f64) -> Self {
        FilterExpression::Ge {
            property: property.into(),
            value,
        }
    }

    pub fn lt(property: impl Into<String>, value: f64) -> Self {
        FilterExpression::Lt {
            property: property.into(),
            value,
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            FilterExpression::Eq { .. } => Operator::Eq,
            FilterExpression::In { .. } => Operator::In,
            FilterExpression::Ge { .. } => Operator::Ge,
            FilterExpression::Lt { .. } => Operator::Lt,
            FilterExpression::All(_) => Operator::All,
            FilterExpression::Any(_) => Operator::Any,
        }
    }

    /// Render the expression in the nested-array wire format.
    pub fn to_json(&self) -> Value {
        let op = self.operator().to_string();
        match self {
            FilterExpression::Eq { property, value } => json!([op, get(property), value]),
            FilterExpression::In { property, values } => {
                json!([op, get(property), ["literal", values]])
            }
            FilterExpression::Ge { property, value } | FilterExpression::Lt { property, value } => {
                json!([op, get(property), number(*value)])
            }
            FilterExpression::All(exprs) | FilterExpression::Any(exprs) => {
                let mut items = Vec::with_capacity(exprs.len() + 1);
                items.push(Value::String(op));
                items.extend(exprs.iter().map(FilterExpression::to_json));
                Value::Array(items)
            }
        }
    }
}

fn get(property: &str) -> Value {
    json!(["get", property])
}

/// Whole numbers are written as JSON integers so `80.0` goes out as `80`.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

impl Serialize for FilterExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
