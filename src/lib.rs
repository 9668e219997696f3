//! # Listener Metadata Pass (Ground Truth)
//!
//! Compile-time extraction of `@Listen(...)` declarations into the records the
//! runtime binder uses to attach DOM listeners.
//!
//! ## Invariants
//!
//! 1. **Nothing executes**: options are read by a closed literal evaluator.
//!    `null`, booleans, numbers, strings and one flat object of those. Anything
//!    else is a Recoverable diagnostic and the options fall back to defaults.
//!
//! 2. **Name grammar**: `[target:]event[.key]`, comma separated.
//!    - targets: `child`, `parent`, `body`, `document`, `window`
//!    - keys: `enter`, `escape`, `space`, `tab`, `up`, `right`, `down`, `left`
//!    - more than one `:` or `.`, or an unknown target/key, is Fatal for that
//!      specifier only (see [`FatalScope`] for the legacy whole-file mode).
//!
//! 3. **Defaults**: `capture = false`; `passive` comes from the passive event
//!    table; `disabled` only when `enabled: false` is written out.
//!
//! 4. **Incomplete is not wrong**: an annotation without a string argument, or
//!    on a member without a static name, is skipped with no diagnostic.
//!
//! 5. **Deterministic output**: bindings are sorted case-insensitively by
//!    event name, then method name.

mod defaults;
mod diagnostics;
mod discovery;
mod extract;
mod front_end;
mod grammar;
mod listen;
mod scanner;
mod static_eval;
mod syntax;


pub use defaults::{is_passive_by_default, resolve_flags, ResolvedFlags, PASSIVE_DEFAULTS};
pub use diagnostics::*;
pub use discovery::{analyze_directory, discover_sources};
pub use extract::{extract_listen_arguments, ListenArguments};
pub use front_end::{parse_classes, read_source, FrontendError};
pub use grammar::{parse_event_specifier, EventSpecifier, GrammarError, KeySuffix, RefTarget};
pub use listen::{
    analyze_class, analyze_classes, analyze_source, analyze_units, sort_bindings,
    AnalyzerOptions, ClassListeners, ConsumedAnnotation, FatalScope, ListenerAnalysis,
    ListenerBinding, SourceUnit,
};
pub use scanner::scan_listen_annotations;
pub use static_eval::{static_eval_object, RawListenOptions, UnsupportedLiteral};
pub use syntax::*;

#[cfg(feature = "napi")]
pub use discovery::analyze_directory_native;
#[cfg(feature = "napi")]
pub use listen::{extract_listeners_native, validate_listener_name_native};
