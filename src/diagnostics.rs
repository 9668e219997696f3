use serde::{Deserialize, Serialize};

use crate::syntax::SourceLocation;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const LISTEN_OPTIONS_UNPARSABLE: &str = "L-ERR-OPTIONS";
pub const LISTEN_MULTIPLE_COLONS: &str = "L-ERR-COLON";
pub const LISTEN_MULTIPLE_PERIODS: &str = "L-ERR-PERIOD";
pub const LISTEN_INVALID_PREFIX: &str = "L-ERR-PREFIX";
pub const LISTEN_INVALID_SUFFIX: &str = "L-ERR-SUFFIX";
pub const LISTEN_SOURCE_SYNTAX: &str = "L-ERR-SYNTAX";
pub const LISTEN_SOURCE_IO: &str = "L-ERR-IO";

fn get_rule(code: &str) -> &'static str {
    match code {
        LISTEN_OPTIONS_UNPARSABLE => {
            "Listener options must be a flat object of boolean, number, string or null literals."
        }
        LISTEN_MULTIPLE_COLONS => "A listener name may carry at most one `target:` prefix.",
        LISTEN_MULTIPLE_PERIODS => "A listener name may carry at most one `.key` suffix.",
        LISTEN_INVALID_PREFIX => "Listener prefixes are: child, parent, body, document, window.",
        LISTEN_INVALID_SUFFIX => {
            "Listener suffixes are: enter, escape, space, tab, up, right, down, left."
        }
        LISTEN_SOURCE_SYNTAX => "Listener metadata is only extracted from parsable sources.",
        LISTEN_SOURCE_IO => "Listener metadata is only extracted from readable sources.",
        _ => "Unknown rule.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC
// ═══════════════════════════════════════════════════════════════════════════════

/// Whether the pass could carry on past the issue with defaults, or had to drop
/// the offending specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Recoverable,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub context: Option<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        code: &str,
        severity: Severity,
        message: &str,
        file: &str,
        location: SourceLocation,
    ) -> Self {
        Self::with_details(code, severity, message, file, location, None, vec![])
    }

    pub fn with_details(
        code: &str,
        severity: Severity,
        message: &str,
        file: &str,
        location: SourceLocation,
        context: Option<String>,
        mut hints: Vec<String>,
    ) -> Self {
        hints.insert(0, get_rule(code).to_string());
        Diagnostic {
            code: code.to_string(),
            severity,
            message: message.to_string(),
            file: file.to_string(),
            line: location.line,
            column: location.column,
            context,
            hints,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            line: self.line,
            column: self.column,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COLLECTOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-unit diagnostics sink. Owned by whichever thread analyses the unit;
/// it records issues in arrival order and never stops the pass.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    file: String,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn recoverable(&mut self, code: &str, message: &str, location: SourceLocation) {
        let d = Diagnostic::new(code, Severity::Recoverable, message, &self.file, location);
        self.items.push(d);
    }

    pub fn fatal(
        &mut self,
        code: &str,
        message: &str,
        location: SourceLocation,
        context: Option<String>,
    ) {
        let d = Diagnostic::with_details(
            code,
            Severity::Fatal,
            message,
            &self.file,
            location,
            context,
            vec![],
        );
        self.items.push(d);
    }

    pub fn has_fatal(&self) -> bool {
        self.items.iter().any(Diagnostic::is_fatal)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
