//! Listener Metadata Pass
//!
//! Scan -> extract -> evaluate options -> validate grammar -> resolve defaults
//! -> assemble. Every `(member, annotation, segment)` triple is processed on
//! its own; a failure on one never discards its siblings.

#[cfg(feature = "napi")]
use napi_derive::napi;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::defaults::resolve_flags;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::extract::extract_listen_arguments;
use crate::front_end::parse_classes;
use crate::grammar::parse_event_specifier;
use crate::scanner::scan_listen_annotations;
use crate::syntax::{ClassDeclaration, SourceLocation};

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// How far a Fatal diagnostic reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FatalScope {
    /// Only the offending specifier is dropped.
    #[default]
    Specifier,
    /// Any Fatal diagnostic empties the whole unit's result.
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerOptions {
    pub annotation_name: String,
    pub fatal_scope: FatalScope,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            annotation_name: "Listen".to_string(),
            fatal_scope: FatalScope::Specifier,
        }
    }
}

impl AnalyzerOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// One runtime listener registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct ListenerBinding {
    /// Specifier as authored, prefix and suffix included.
    pub event_name: String,
    pub method_name: String,
    pub capture: bool,
    pub passive: bool,
    pub disabled: bool,
}

/// An annotation that produced bindings and can be dropped from emitted code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedAnnotation {
    pub member_name: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListeners {
    pub class_name: Option<String>,
    pub location: SourceLocation,
    pub bindings: Vec<ListenerBinding>,
    pub consumed: Vec<ConsumedAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerAnalysis {
    pub file_path: String,
    pub classes: Vec<ClassListeners>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ListenerAnalysis {
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// All bindings of the unit, class by class.
    pub fn bindings(&self) -> impl Iterator<Item = &ListenerBinding> {
        self.classes.iter().flat_map(|c| c.bindings.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUnit {
    pub file_path: String,
    pub source: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASS PASS
// ═══════════════════════════════════════════════════════════════════════════════

/// Extract listener bindings from one class. Problems go to `diagnostics`;
/// whatever could be validated is always returned, sorted.
pub fn analyze_class(
    class: &ClassDeclaration,
    options: &AnalyzerOptions,
    diagnostics: &mut Diagnostics,
) -> ClassListeners {
    let mut bindings = Vec::new();
    let mut consumed = Vec::new();
    let reported_before = diagnostics.len();

    for (member, invocation) in scan_listen_annotations(class, &options.annotation_name) {
        let Some(args) = extract_listen_arguments(member, invocation, diagnostics) else {
            continue;
        };

        let produced_before = bindings.len();

        for segment in args.event_token.split(',') {
            if segment.trim().is_empty() {
                continue;
            }

            let specifier = match parse_event_specifier(segment) {
                Ok(specifier) => specifier,
                Err(e) => {
                    diagnostics.fatal(
                        e.code(),
                        &e.to_string(),
                        invocation.location,
                        Some(format!("{}()", args.method_name)),
                    );
                    continue;
                }
            };

            let flags = resolve_flags(&specifier.core_name, &args.options);
            bindings.push(ListenerBinding {
                event_name: specifier.event_name,
                method_name: args.method_name.clone(),
                capture: flags.capture,
                passive: flags.passive,
                disabled: flags.disabled,
            });
        }

        if bindings.len() > produced_before {
            consumed.push(ConsumedAnnotation {
                member_name: args.method_name.clone(),
                location: invocation.location,
            });
        }
    }

    sort_bindings(&mut bindings);

    tracing::debug!(
        class = class.name.as_deref().unwrap_or("<anonymous>"),
        bindings = bindings.len(),
        diagnostics = diagnostics.len() - reported_before,
        "analyzed listeners"
    );

    ClassListeners {
        class_name: class.name.clone(),
        location: class.location,
        bindings,
        consumed,
    }
}

/// Case-insensitive by event name, then by method name. Stable.
pub fn sort_bindings(bindings: &mut [ListenerBinding]) {
    bindings.sort_by(|a, b| {
        a.event_name
            .to_lowercase()
            .cmp(&b.event_name.to_lowercase())
            .then_with(|| a.method_name.to_lowercase().cmp(&b.method_name.to_lowercase()))
    });
}

// ═══════════════════════════════════════════════════════════════════════════════
// UNIT PASS
// ═══════════════════════════════════════════════════════════════════════════════

/// Run the pass over already-lowered classes of one unit.
pub fn analyze_classes(
    classes: &[ClassDeclaration],
    file_path: &str,
    options: &AnalyzerOptions,
) -> ListenerAnalysis {
    let mut diagnostics = Diagnostics::new(file_path);

    let mut classes: Vec<ClassListeners> = classes
        .iter()
        .map(|class| analyze_class(class, options, &mut diagnostics))
        .collect();

    if options.fatal_scope == FatalScope::File && diagnostics.has_fatal() {
        for class in &mut classes {
            class.bindings.clear();
            class.consumed.clear();
        }
    }

    ListenerAnalysis {
        file_path: file_path.to_string(),
        classes,
        diagnostics: diagnostics.into_vec(),
    }
}

/// Parse a TypeScript/TSX source and run the pass over every class in it.
pub fn analyze_source(source: &str, file_path: &str, options: &AnalyzerOptions) -> ListenerAnalysis {
    match parse_classes(source, file_path) {
        Ok(classes) => analyze_classes(&classes, file_path, options),
        Err(e) => {
            let mut diagnostics = Diagnostics::new(file_path);
            diagnostics.push(e.to_diagnostic());
            ListenerAnalysis {
                file_path: file_path.to_string(),
                classes: vec![],
                diagnostics: diagnostics.into_vec(),
            }
        }
    }
}

/// Units share nothing, so they are analysed in parallel. Output order
/// follows input order.
pub fn analyze_units(units: &[SourceUnit], options: &AnalyzerOptions) -> Vec<ListenerAnalysis> {
    units
        .par_iter()
        .map(|unit| analyze_source(&unit.source, &unit.file_path, options))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn extract_listeners_native(
    source: String,
    file_path: String,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let options = match options_json {
        Some(json) => AnalyzerOptions::from_json(&json)
            .map_err(|e| napi::Error::from_reason(format!("invalid listener options: {}", e)))?,
        None => AnalyzerOptions::default(),
    };

    let analysis = analyze_source(&source, &file_path, &options);
    serde_json::to_value(analysis).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn validate_listener_name_native(token: String) -> serde_json::Value {
    match parse_event_specifier(&token) {
        Ok(specifier) => serde_json::json!({ "ok": true, "specifier": specifier }),
        Err(e) => serde_json::json!({ "ok": false, "code": e.code(), "message": e.to_string() }),
    }
}
