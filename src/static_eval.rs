//! Static Literal Evaluator for Listener Options
//!
//! Evaluates the options argument of a listener annotation at compile time.
//! Only `null`, booleans, numbers, strings and one flat object of those are
//! understood. Nothing is ever executed: any other shape is rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::syntax::{LiteralNode, ObjectMember};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {kind} in listener options")]
pub struct UnsupportedLiteral {
    pub kind: String,
}

impl UnsupportedLiteral {
    fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// Evaluate the members of a flat object literal.
/// Later duplicate keys overwrite earlier ones, as they would at runtime.
pub fn static_eval_object(members: &[ObjectMember]) -> Result<Map<String, Value>, UnsupportedLiteral> {
    let mut out = Map::new();

    for member in members {
        match member {
            ObjectMember::Property { key, value } => {
                out.insert(key.clone(), static_eval_scalar(value)?);
            }
            ObjectMember::Unsupported { kind } => return Err(UnsupportedLiteral::new(kind.clone())),
        }
    }

    Ok(out)
}

fn static_eval_scalar(node: &LiteralNode) -> Result<Value, UnsupportedLiteral> {
    match node {
        LiteralNode::Null => Ok(Value::Null),
        LiteralNode::Boolean(b) => Ok(Value::Bool(*b)),
        LiteralNode::Number(n) => Number::from_f64(*n)
            .map(Value::Number)
            .ok_or_else(|| UnsupportedLiteral::new("non-finite number")),
        LiteralNode::String(s) => Ok(Value::String(s.clone())),
        // Flat objects only
        LiteralNode::Object(_) => Err(UnsupportedLiteral::new("nested object")),
        LiteralNode::Other(kind) => Err(UnsupportedLiteral::new(kind.clone())),
    }
}

/// Options as authored. `None` means the key was absent or not a boolean;
/// that is kept distinct from an explicit `false` until defaults are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListenOptions {
    pub capture: Option<bool>,
    pub passive: Option<bool>,
    pub enabled: Option<bool>,
}

impl RawListenOptions {
    pub fn from_literal(object: &Map<String, Value>) -> Self {
        let flag = |key: &str| object.get(key).and_then(Value::as_bool);
        RawListenOptions {
            capture: flag("capture"),
            passive: flag("passive"),
            enabled: flag("enabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prop(key: &str, value: LiteralNode) -> ObjectMember {
        ObjectMember::Property {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn test_flat_literals_round_trip() {
        let members = vec![
            prop("capture", LiteralNode::Boolean(true)),
            prop("delay", LiteralNode::Number(250.0)),
            prop("label", LiteralNode::String("tabs".to_string())),
            prop("target", LiteralNode::Null),
        ];

        let evaluated = static_eval_object(&members).unwrap();
        assert_eq!(
            Value::Object(evaluated),
            json!({ "capture": true, "delay": 250.0, "label": "tabs", "target": null })
        );
    }

    #[test]
    fn test_empty_object() {
        assert!(static_eval_object(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let members = vec![
            prop("passive", LiteralNode::Boolean(true)),
            prop("passive", LiteralNode::Boolean(false)),
        ];
        let evaluated = static_eval_object(&members).unwrap();
        assert_eq!(evaluated.get("passive"), Some(&json!(false)));
    }

    #[test]
    fn test_nested_object_rejected() {
        let members = vec![
            prop("capture", LiteralNode::Boolean(true)),
            prop("inner", LiteralNode::Object(vec![])),
        ];
        let err = static_eval_object(&members).unwrap_err();
        assert_eq!(err.kind, "nested object");
    }

    #[test]
    fn test_call_and_identifier_rejected() {
        let call = vec![prop("capture", LiteralNode::Other("call expression".to_string()))];
        assert_eq!(static_eval_object(&call).unwrap_err().kind, "call expression");

        let ident = vec![prop("passive", LiteralNode::Other("identifier".to_string()))];
        assert!(static_eval_object(&ident).is_err());
    }

    #[test]
    fn test_spread_rejected() {
        let members = vec![ObjectMember::Unsupported {
            kind: "spread property".to_string(),
        }];
        let err = static_eval_object(&members).unwrap_err();
        assert_eq!(err.to_string(), "unsupported spread property in listener options");
    }

    #[test]
    fn test_non_finite_number_rejected() {
        let members = vec![prop("delay", LiteralNode::Number(f64::INFINITY))];
        assert!(static_eval_object(&members).is_err());
    }

    #[test]
    fn test_raw_options_only_honour_booleans() {
        let object = json!({ "capture": "yes", "passive": false, "enabled": 0, "other": true });
        let raw = RawListenOptions::from_literal(object.as_object().unwrap());
        assert_eq!(
            raw,
            RawListenOptions {
                capture: None,
                passive: Some(false),
                enabled: None,
            }
        );
    }
}
