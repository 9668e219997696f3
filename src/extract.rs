use crate::diagnostics::{Diagnostics, LISTEN_OPTIONS_UNPARSABLE};
use crate::static_eval::{static_eval_object, RawListenOptions};
use crate::syntax::{AnnotationInvocation, ArgumentExpression, ClassMember};

/// Arguments pulled out of one listener annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenArguments {
    /// Whitespace and quotes removed; may still hold several comma segments.
    pub event_token: String,
    pub method_name: String,
    pub options: RawListenOptions,
}

/// Returns `None` for annotations that are present but unusable (no method
/// name, no string argument). Those are not reported.
pub fn extract_listen_arguments(
    member: &ClassMember,
    invocation: &AnnotationInvocation,
    diagnostics: &mut Diagnostics,
) -> Option<ListenArguments> {
    let method_name = member.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;

    let mut event_token: Option<String> = None;
    let mut options_members = None;

    for argument in &invocation.arguments {
        match argument {
            ArgumentExpression::StringLiteral { value, .. } if event_token.is_none() => {
                event_token = Some(normalize_event_token(value));
            }
            ArgumentExpression::ObjectLiteral { members, .. } if event_token.is_some() => {
                options_members = Some(members);
                break;
            }
            _ => {}
        }
    }

    let event_token = event_token?;

    let options = match options_members {
        Some(members) => match static_eval_object(members) {
            Ok(object) => RawListenOptions::from_literal(&object),
            Err(e) => {
                diagnostics.recoverable(
                    LISTEN_OPTIONS_UNPARSABLE,
                    &format!("unable to parse listener options for \"{}\": {}", method_name, e),
                    invocation.location,
                );
                RawListenOptions::default()
            }
        },
        None => RawListenOptions::default(),
    };

    Some(ListenArguments {
        event_token,
        method_name: method_name.to_string(),
        options,
    })
}

fn normalize_event_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\'' | '"' | '`'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{LiteralNode, ObjectMember, SourceLocation};

    fn string_arg(value: &str) -> ArgumentExpression {
        ArgumentExpression::StringLiteral {
            value: value.to_string(),
            location: SourceLocation::default(),
        }
    }

    fn object_arg(members: Vec<ObjectMember>) -> ArgumentExpression {
        ArgumentExpression::ObjectLiteral {
            members,
            location: SourceLocation::default(),
        }
    }

    fn flag(key: &str, value: bool) -> ObjectMember {
        ObjectMember::Property {
            key: key.to_string(),
            value: LiteralNode::Boolean(value),
        }
    }

    fn listen(arguments: Vec<ArgumentExpression>) -> AnnotationInvocation {
        AnnotationInvocation {
            name: "Listen".to_string(),
            location: SourceLocation { line: 4, column: 3 },
            arguments,
        }
    }

    fn method(name: &str) -> ClassMember {
        ClassMember {
            name: Some(name.to_string()),
            location: SourceLocation::default(),
            annotations: vec![],
        }
    }

    #[test]
    fn test_token_whitespace_removed() {
        let mut diagnostics = Diagnostics::new("a.ts");
        let args = extract_listen_arguments(
            &method("onMove"),
            &listen(vec![string_arg(" mouseover , touchstart ")]),
            &mut diagnostics,
        )
        .unwrap();
        assert_eq!(args.event_token, "mouseover,touchstart");
        assert_eq!(args.method_name, "onMove");
        assert_eq!(args.options, RawListenOptions::default());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_string_and_following_object() {
        let mut diagnostics = Diagnostics::new("a.ts");
        let invocation = listen(vec![
            object_arg(vec![flag("passive", true)]),
            string_arg("click"),
            string_arg("ignored"),
            object_arg(vec![flag("capture", true)]),
            object_arg(vec![flag("enabled", false)]),
        ]);
        let args = extract_listen_arguments(&method("onClick"), &invocation, &mut diagnostics).unwrap();
        assert_eq!(args.event_token, "click");
        assert_eq!(args.options.capture, Some(true));
        assert_eq!(args.options.passive, None);
        assert_eq!(args.options.enabled, None);
    }

    #[test]
    fn test_missing_string_is_skipped_silently() {
        let mut diagnostics = Diagnostics::new("a.ts");
        let invocation = listen(vec![object_arg(vec![flag("capture", true)])]);
        assert!(extract_listen_arguments(&method("onClick"), &invocation, &mut diagnostics).is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_method_name_is_skipped_silently() {
        let mut diagnostics = Diagnostics::new("a.ts");
        let member = ClassMember {
            name: None,
            location: SourceLocation::default(),
            annotations: vec![],
        };
        assert!(extract_listen_arguments(&member, &listen(vec![string_arg("click")]), &mut diagnostics).is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unparsable_options_fall_back_to_defaults() {
        let mut diagnostics = Diagnostics::new("a.ts");
        let invocation = listen(vec![
            string_arg("scroll"),
            object_arg(vec![
                flag("capture", true),
                ObjectMember::Property {
                    key: "passive".to_string(),
                    value: LiteralNode::Other("call expression".to_string()),
                },
            ]),
        ]);
        let args = extract_listen_arguments(&method("onScroll"), &invocation, &mut diagnostics).unwrap();
        assert_eq!(args.options, RawListenOptions::default());

        let items = diagnostics.into_vec();
        assert_eq!(items.len(), 1);
        assert!(!items[0].is_fatal());
        assert!(items[0].message.contains("unable to parse listener options"));
        assert_eq!(items[0].location(), SourceLocation { line: 4, column: 3 });
    }
}
