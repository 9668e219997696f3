//! Oxc Front End for the Listener Pass
//!
//! Parses TypeScript/TSX with oxc and lowers every class into the
//! parser-neutral views in `syntax`. Only the shapes the pass needs survive
//! lowering: member names, decorators and their argument literals.

use std::fs;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, Class, ClassElement, Decorator, Expression, ObjectExpression, ObjectPropertyKind,
    PropertyKey, PropertyKind,
};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use oxc_syntax::operator::UnaryOperator;
use thiserror::Error;

use crate::diagnostics::{Diagnostic, Severity, LISTEN_SOURCE_IO, LISTEN_SOURCE_SYNTAX};
use crate::syntax::{
    AnnotationInvocation, ArgumentExpression, ClassDeclaration, ClassMember, LiteralNode,
    ObjectMember, SourceLocation,
};

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("failed to parse {file}: {message}")]
    Syntax {
        file: String,
        message: String,
        location: SourceLocation,
    },
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

impl FrontendError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, file, location) = match self {
            FrontendError::Syntax { file, location, .. } => (LISTEN_SOURCE_SYNTAX, file, *location),
            FrontendError::Io { file, .. } => {
                (LISTEN_SOURCE_IO, file, SourceLocation { line: 1, column: 1 })
            }
        };
        Diagnostic::new(code, Severity::Fatal, &self.to_string(), file, location)
    }
}

pub fn read_source(path: &Path) -> Result<String, FrontendError> {
    fs::read_to_string(path).map_err(|source| FrontendError::Io {
        file: path.to_string_lossy().to_string(),
        source,
    })
}

/// Parse `source` and return every class it contains, outer classes before
/// the classes nested inside them.
pub fn parse_classes(source: &str, file_path: &str) -> Result<Vec<ClassDeclaration>, FrontendError> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(file_path).unwrap_or_else(|_| {
        SourceType::default()
            .with_typescript(true)
            .with_module(true)
            .with_jsx(true)
    });

    let ret = Parser::new(&allocator, source, source_type).parse();
    let lines = LineIndex::new(source);
    if let Some(error) = ret.errors.first() {
        let offset = error
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map_or(0, |label| label.offset());
        return Err(FrontendError::Syntax {
            file: file_path.to_string(),
            message: error.to_string(),
            location: lines.location(offset as u32),
        });
    }

    let mut collector = ClassCollector {
        lines,
        classes: Vec::new(),
    };
    collector.visit_program(&ret.program);

    tracing::trace!(file = file_path, classes = collector.classes.len(), "collected classes");
    Ok(collector.classes)
}

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE LOCATIONS
// ═══════════════════════════════════════════════════════════════════════════════

struct LineIndex<'s> {
    source: &'s str,
    starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    fn new(source: &'s str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { source, starts }
    }

    fn location(&self, offset: u32) -> SourceLocation {
        let offset = (offset as usize).min(self.source.len());
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - line_start);

        SourceLocation {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOWERING
// ═══════════════════════════════════════════════════════════════════════════════

struct ClassCollector<'s> {
    lines: LineIndex<'s>,
    classes: Vec<ClassDeclaration>,
}

impl<'a, 's> Visit<'a> for ClassCollector<'s> {
    fn visit_class(&mut self, class: &Class<'a>) {
        let lowered = self.lower_class(class);
        self.classes.push(lowered);
        walk::walk_class(self, class);
    }
}

impl<'s> ClassCollector<'s> {
    fn lower_class(&self, class: &Class<'_>) -> ClassDeclaration {
        let mut members = Vec::new();

        for element in &class.body.body {
            let (decorators, key, computed, span) = match element {
                ClassElement::MethodDefinition(m) => (&m.decorators, &m.key, m.computed, m.span),
                ClassElement::PropertyDefinition(p) => (&p.decorators, &p.key, p.computed, p.span),
                ClassElement::AccessorProperty(a) => (&a.decorators, &a.key, a.computed, a.span),
                _ => continue,
            };

            members.push(ClassMember {
                name: if computed { None } else { member_name(key) },
                location: self.lines.location(span.start),
                annotations: decorators
                    .iter()
                    .filter_map(|d| self.lower_decorator(d))
                    .collect(),
            });
        }

        ClassDeclaration {
            name: class.id.as_ref().map(|id| id.name.to_string()),
            location: self.lines.location(class.span.start),
            members,
        }
    }

    fn lower_decorator(&self, decorator: &Decorator<'_>) -> Option<AnnotationInvocation> {
        let location = self.lines.location(decorator.span.start);

        match &decorator.expression {
            Expression::CallExpression(call) => {
                let Expression::Identifier(callee) = &call.callee else {
                    return None;
                };
                Some(AnnotationInvocation {
                    name: callee.name.to_string(),
                    location,
                    arguments: call
                        .arguments
                        .iter()
                        .map(|arg| self.lower_argument(arg))
                        .collect(),
                })
            }
            // `@Listen` without parentheses
            Expression::Identifier(id) => Some(AnnotationInvocation {
                name: id.name.to_string(),
                location,
                arguments: vec![],
            }),
            _ => None,
        }
    }

    fn lower_argument(&self, argument: &Argument<'_>) -> ArgumentExpression {
        let location = self.lines.location(argument.span().start);

        match argument {
            Argument::StringLiteral(s) => ArgumentExpression::StringLiteral {
                value: s.value.to_string(),
                location,
            },
            Argument::ObjectExpression(obj) => ArgumentExpression::ObjectLiteral {
                members: lower_object_members(obj),
                location,
            },
            Argument::SpreadElement(_) => ArgumentExpression::Other {
                kind: "spread element".to_string(),
                location,
            },
            other => ArgumentExpression::Other {
                kind: other
                    .as_expression()
                    .map(expression_kind)
                    .unwrap_or("expression")
                    .to_string(),
                location,
            },
        }
    }
}

fn member_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(s) => Some(s.value.to_string()),
        _ => None,
    }
}

fn lower_object_members(obj: &ObjectExpression<'_>) -> Vec<ObjectMember> {
    obj.properties
        .iter()
        .map(|property| match property {
            ObjectPropertyKind::SpreadProperty(_) => unsupported("spread property"),
            ObjectPropertyKind::ObjectProperty(p) => {
                if p.kind != PropertyKind::Init {
                    return unsupported("accessor");
                }
                if p.method {
                    return unsupported("method");
                }
                if p.computed {
                    return unsupported("computed key");
                }
                let key = match &p.key {
                    PropertyKey::StaticIdentifier(id) => id.name.to_string(),
                    PropertyKey::StringLiteral(s) => s.value.to_string(),
                    PropertyKey::NumericLiteral(n) => n.value.to_string(),
                    _ => return unsupported("computed key"),
                };
                ObjectMember::Property {
                    key,
                    value: lower_literal(&p.value),
                }
            }
        })
        .collect()
}

fn lower_literal(expr: &Expression<'_>) -> LiteralNode {
    match expr {
        Expression::NullLiteral(_) => LiteralNode::Null,
        Expression::BooleanLiteral(b) => LiteralNode::Boolean(b.value),
        Expression::NumericLiteral(n) => LiteralNode::Number(n.value),
        Expression::StringLiteral(s) => LiteralNode::String(s.value.to_string()),
        Expression::ObjectExpression(obj) => LiteralNode::Object(lower_object_members(obj)),
        Expression::ParenthesizedExpression(p) => lower_literal(&p.expression),
        // `-1` is a unary expression in the tree but still a plain number
        Expression::UnaryExpression(u) if u.operator == UnaryOperator::UnaryNegation => {
            match &u.argument {
                Expression::NumericLiteral(n) => LiteralNode::Number(-n.value),
                _ => LiteralNode::Other("unary expression".to_string()),
            }
        }
        other => LiteralNode::Other(expression_kind(other).to_string()),
    }
}

fn unsupported(kind: &str) -> ObjectMember {
    ObjectMember::Unsupported {
        kind: kind.to_string(),
    }
}

fn expression_kind(expr: &Expression<'_>) -> &'static str {
    match expr {
        Expression::Identifier(_) => "identifier",
        Expression::CallExpression(_) | Expression::NewExpression(_) => "call expression",
        Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_) => "function",
        Expression::ArrayExpression(_) => "array",
        Expression::ObjectExpression(_) => "object",
        Expression::TemplateLiteral(_) | Expression::TaggedTemplateExpression(_) => {
            "template literal"
        }
        Expression::UnaryExpression(_) => "unary expression",
        Expression::BinaryExpression(_) | Expression::LogicalExpression(_) => "binary expression",
        Expression::ConditionalExpression(_) => "conditional expression",
        Expression::StaticMemberExpression(_)
        | Expression::ComputedMemberExpression(_)
        | Expression::PrivateFieldExpression(_) => "member expression",
        Expression::RegExpLiteral(_) => "regular expression",
        Expression::BigIntLiteral(_) => "bigint",
        _ => "expression",
    }
}
