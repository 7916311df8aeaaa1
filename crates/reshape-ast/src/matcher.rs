//! Partial structural matching.
//!
//! A pattern describes only the fields a caller cares about. Every field it
//! names must exist on the candidate and match recursively; fields it leaves
//! out are ignored. Sequences are compared position by position, except that
//! an empty pattern sequence only asks for "some sequence here", whatever its
//! length.
//!
//! ```ignore
//! use serde_json::json;
//! use reshape_ast::matches;
//!
//! let pattern = json!({ "type": "CallExpression", "arguments": [] });
//! assert!(matches(Some(&pattern), &tree.to_value(call)));
//! ```

use crate::ast::{NodeId, SyntaxTree};
use serde_json::Value;

/// Does `candidate` have every field `pattern` has, with matching values?
///
/// `None` is an absent pattern and matches anything. A `null` pattern only
/// matches `null`.
pub fn matches(pattern: Option<&Value>, candidate: &Value) -> bool {
    let Some(pattern) = pattern else {
        return true;
    };
    match pattern {
        Value::Null => candidate.is_null(),
        Value::Object(fields) => fields
            .iter()
            .all(|(key, expected)| field_matches(expected, candidate.get(key.as_str()))),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .all(|(i, expected)| field_matches(expected, candidate.get(i))),
        scalar => scalar_eq(scalar, candidate),
    }
}

/// Match a pattern against a syntax tree node, converting the node first.
pub fn matches_node(pattern: Option<&Value>, tree: &SyntaxTree, id: NodeId) -> bool {
    pattern.is_none() || matches(pattern, &tree.to_value(id))
}

fn field_matches(expected: &Value, actual: Option<&Value>) -> bool {
    match (expected, actual) {
        (Value::Array(items), Some(actual @ Value::Array(_))) => {
            items.is_empty() || matches(Some(expected), actual)
        }
        (Value::Array(_), _) => false,
        (Value::Object(_) | Value::Null, Some(actual)) => matches(Some(expected), actual),
        (Value::Object(_) | Value::Null, None) => false,
        (scalar, Some(actual)) => scalar_eq(scalar, actual),
        (_, None) => false,
    }
}

fn scalar_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => expected == actual,
    }
}
