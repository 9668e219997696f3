use crate::syntax::{AnnotationInvocation, ClassDeclaration, ClassMember};

/// Yields every `(member, invocation)` pair whose annotation is named
/// `annotation_name`, in source order.
pub fn scan_listen_annotations<'c>(
    class: &'c ClassDeclaration,
    annotation_name: &'c str,
) -> impl Iterator<Item = (&'c ClassMember, &'c AnnotationInvocation)> + 'c {
    class
        .members
        .iter()
        .filter(|member| !member.annotations.is_empty())
        .flat_map(move |member| {
            member
                .annotations
                .iter()
                .filter(move |invocation| invocation.name == annotation_name)
                .map(move |invocation| (member, invocation))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SourceLocation;

    fn annotation(name: &str) -> AnnotationInvocation {
        AnnotationInvocation {
            name: name.to_string(),
            location: SourceLocation::default(),
            arguments: vec![],
        }
    }

    fn member(name: &str, annotations: Vec<AnnotationInvocation>) -> ClassMember {
        ClassMember {
            name: Some(name.to_string()),
            location: SourceLocation::default(),
            annotations,
        }
    }

    #[test]
    fn test_only_matching_annotations() {
        let class = ClassDeclaration {
            name: Some("Tabs".to_string()),
            location: SourceLocation::default(),
            members: vec![
                member("selectedTab", vec![annotation("State")]),
                member("render", vec![]),
                member("tabDidLoad", vec![annotation("Listen")]),
                member("both", vec![annotation("Prop"), annotation("Listen"), annotation("Listen")]),
            ],
        };

        let found: Vec<_> = scan_listen_annotations(&class, "Listen")
            .map(|(m, _)| m.name.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(found, vec!["tabDidLoad", "both", "both"]);
    }

    #[test]
    fn test_custom_annotation_name() {
        let class = ClassDeclaration {
            name: None,
            location: SourceLocation::default(),
            members: vec![member("onKey", vec![annotation("HostListener")])],
        };
        assert_eq!(scan_listen_annotations(&class, "Listen").count(), 0);
        assert_eq!(scan_listen_annotations(&class, "HostListener").count(), 1);
    }
}
