//! Parser-neutral view of the class declarations the listener pass reads.
//!
//! Any front end can lower into these types; the oxc adapter lives in
//! `front_end`. All views are owned and serde-friendly so a host can also hand
//! a pre-lowered tree across the Node bridge as JSON.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    /// `None` for anonymous class expressions.
    pub name: Option<String>,
    #[serde(default)]
    pub location: SourceLocation,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    /// Declared identifier. `None` when the key is computed or otherwise not
    /// statically known.
    pub name: Option<String>,
    #[serde(default)]
    pub location: SourceLocation,
    #[serde(default)]
    pub annotations: Vec<AnnotationInvocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationInvocation {
    pub name: String,
    #[serde(default)]
    pub location: SourceLocation,
    #[serde(default)]
    pub arguments: Vec<ArgumentExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ArgumentExpression {
    StringLiteral {
        value: String,
        #[serde(default)]
        location: SourceLocation,
    },
    ObjectLiteral {
        members: Vec<ObjectMember>,
        #[serde(default)]
        location: SourceLocation,
    },
    Other {
        kind: String,
        #[serde(default)]
        location: SourceLocation,
    },
}

impl ArgumentExpression {
    pub fn location(&self) -> SourceLocation {
        match self {
            ArgumentExpression::StringLiteral { location, .. }
            | ArgumentExpression::ObjectLiteral { location, .. }
            | ArgumentExpression::Other { location, .. } => *location,
        }
    }
}

/// Shape of an expression nested inside an object-literal argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum LiteralNode {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(Vec<ObjectMember>),
    /// Anything else: calls, identifiers, arrays, templates, unary ops...
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ObjectMember {
    Property { key: String, value: LiteralNode },
    /// Spreads, methods, accessors and computed keys.
    Unsupported { kind: String },
}
