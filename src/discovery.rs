//! Discovery Module for the Listener Pass
//!
//! Recursively scans a directory for TypeScript sources and runs the listener
//! pass over each of them as an independent unit.

#[cfg(feature = "napi")]
use napi_derive::napi;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::diagnostics::Diagnostics;
use crate::front_end::read_source;
use crate::listen::{analyze_units, AnalyzerOptions, ListenerAnalysis, SourceUnit};

/// Recursively find `.ts` / `.tsx` sources, skipping declaration files and
/// `node_modules`. Sorted so repeated runs visit files in the same order.
pub fn discover_sources(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != "node_modules")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_listener_source(path))
        .collect();

    files.sort();
    files
}

fn is_listener_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with(".d.ts") {
        return false;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts") | Some("tsx")
    )
}

/// Analyse every source under `dir`. A file that cannot be read yields a
/// result holding only its I/O diagnostic.
pub fn analyze_directory(dir: &Path, options: &AnalyzerOptions) -> Vec<ListenerAnalysis> {
    let mut units = Vec::new();
    let mut unreadable = Vec::new();

    for path in discover_sources(dir) {
        let file_path = path.to_string_lossy().to_string();
        match read_source(&path) {
            Ok(source) => units.push(SourceUnit { file_path, source }),
            Err(e) => {
                tracing::warn!(file = %file_path, error = %e, "skipping unreadable source");
                let mut diagnostics = Diagnostics::new(&file_path);
                diagnostics.push(e.to_diagnostic());
                unreadable.push(ListenerAnalysis {
                    file_path,
                    classes: vec![],
                    diagnostics: diagnostics.into_vec(),
                });
            }
        }
    }

    let mut results = analyze_units(&units, options);
    results.extend(unreadable);
    results.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    results
}

#[cfg(feature = "napi")]
#[napi]
pub fn analyze_directory_native(base_dir: String) -> serde_json::Value {
    let path = Path::new(&base_dir);
    if !path.exists() {
        return serde_json::Value::Array(vec![]);
    }

    let results = analyze_directory(path, &AnalyzerOptions::default());
    serde_json::to_value(results).unwrap_or(serde_json::Value::Null)
}
