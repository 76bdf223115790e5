//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as batched diagnostics whose concrete types move
//! between releases. This module flattens them into a small, stable
//! [`Diagnostic`] record so the rest of the crate and the CLI never depend on
//! upstream error internals.

use serde::Serialize;
use std::fmt;

/// A single build diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic with no location.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            file: None,
            line: None,
            column: None,
            help: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    /// `file:line:column` when a file is known.
    pub fn location(&self) -> Option<String> {
        let file = self.file.as_ref()?;
        Some(match (self.line, self.column) {
            (Some(line), Some(column)) => format!("{file}:{line}:{column}"),
            (Some(line), None) => format!("{file}:{line}"),
            _ => file.clone(),
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(location) => write!(f, "[{}] {} ({})", self.kind, self.message, location)?,
            None => write!(f, "[{}] {}", self.kind, self.message)?,
        }
        if let Some(help) = &self.help {
            write!(f, "\n  help: {help}")?;
        }
        Ok(())
    }
}

/// Diagnostic kind (mirrors Rolldown's event kinds we care about).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingExport,
    ParseError,
    CircularDependency,
    UnresolvedEntry,
    UnresolvedImport,
    InvalidOption,
    Plugin,
    Other,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::MissingExport => "MissingExport",
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::CircularDependency => "CircularDependency",
            DiagnosticKind::UnresolvedEntry => "UnresolvedEntry",
            DiagnosticKind::UnresolvedImport => "UnresolvedImport",
            DiagnosticKind::InvalidOption => "InvalidOption",
            DiagnosticKind::Plugin => "Plugin",
            DiagnosticKind::Other => "Error",
        };
        f.write_str(name)
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Extract diagnostics from a Rolldown error value.
///
/// Rolldown's batched error type is only reliably `Debug` across versions, so
/// extraction works on the formatted representation.
pub fn extract_from_rolldown_error(error: &dyn fmt::Debug) -> Vec<Diagnostic> {
    let error_str = format!("{error:?}");

    if error_str.contains("BatchedBuildDiagnostic") {
        let parts: Vec<&str> = error_str
            .split("BuildDiagnostic")
            .map(str::trim)
            .filter(|s| !s.starts_with("Batched") && s.chars().any(char::is_alphanumeric))
            .collect();
        if !parts.is_empty() {
            return parts
                .iter()
                .map(|part| extract_single(part, DiagnosticSeverity::Error))
                .collect();
        }
    }

    vec![extract_single(&error_str, DiagnosticSeverity::Error)]
}

/// Extract a warning diagnostic from a Rolldown warning value.
pub fn extract_warning(warning: &dyn fmt::Debug) -> Diagnostic {
    extract_single(&format!("{warning:?}"), DiagnosticSeverity::Warning)
}

fn extract_single(text: &str, severity: DiagnosticSeverity) -> Diagnostic {
    Diagnostic {
        kind: classify(text),
        severity,
        message: text.trim().to_string(),
        file: extract_file_path(text),
        line: extract_number_after(text, &["line ", "line: "]),
        column: extract_number_after(text, &["column ", "column: ", "col "]),
        help: extract_help_text(text),
    }
}

fn classify(text: &str) -> DiagnosticKind {
    if text.contains("MissingExport") {
        DiagnosticKind::MissingExport
    } else if text.contains("Parse") || text.contains("Syntax") || text.contains("Expected") {
        DiagnosticKind::ParseError
    } else if text.contains("Circular") {
        DiagnosticKind::CircularDependency
    } else if text.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if text.contains("UnresolvedImport") || text.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if text.contains("InvalidOption") {
        DiagnosticKind::InvalidOption
    } else if text.contains("Plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other
    }
}

/// Extract a source file path from a message.
fn extract_file_path(text: &str) -> Option<String> {
    for ext in [".tsx", ".ts", ".jsx", ".js", ".mjs", ".cjs", ".css"] {
        let Some(pos) = text.find(ext) else {
            continue;
        };
        let before = &text[..pos + ext.len()];
        for indicator in ["in ", "at ", "file: ", "path: ", "\"", "'"] {
            if let Some(start) = before.rfind(indicator) {
                let path = before[start + indicator.len()..].trim();
                if !path.is_empty() && !path.contains(char::is_whitespace) {
                    return Some(path.to_string());
                }
            }
        }
    }
    None
}

fn extract_number_after(text: &str, patterns: &[&str]) -> Option<u32> {
    patterns.iter().find_map(|pattern| {
        let pos = text.find(pattern)?;
        let digits: String = text[pos + pattern.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    })
}

fn extract_help_text(text: &str) -> Option<String> {
    ["help: ", "Help: ", "hint: ", "Hint: "]
        .iter()
        .find_map(|indicator| {
            let pos = text.find(indicator)?;
            let help = text[pos + indicator.len()..].lines().next()?.trim();
            (!help.is_empty()).then(|| help.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeError(&'static str);

    impl fmt::Debug for FakeError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    #[test]
    fn test_classify_unresolved_import() {
        let diags = extract_from_rolldown_error(&FakeError(
            "UnresolvedImport: Could not resolve './missing' in src/index.tsx",
        ));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedImport);
        assert_eq!(diags[0].file.as_deref(), Some("src/index.tsx"));
        assert!(diags[0].is_error());
    }

    #[test]
    fn test_extract_line_and_column() {
        let diags = extract_from_rolldown_error(&FakeError(
            "ParseError: Unexpected token at src/App.tsx line 12 column 4",
        ));
        let diag = &diags[0];
        assert_eq!(diag.kind, DiagnosticKind::ParseError);
        assert_eq!(diag.line, Some(12));
        assert_eq!(diag.column, Some(4));
        assert_eq!(diag.location().as_deref(), Some("src/App.tsx:12:4"));
    }

    #[test]
    fn test_extract_help() {
        let diags = extract_from_rolldown_error(&FakeError(
            "MissingExport: \"Foo\" is not exported\nhelp: did you mean Bar?",
        ));
        assert_eq!(diags[0].kind, DiagnosticKind::MissingExport);
        assert_eq!(diags[0].help.as_deref(), Some("did you mean Bar?"));
    }

    #[test]
    fn test_batched_error_splits() {
        let diags = extract_from_rolldown_error(&FakeError(
            "BatchedBuildDiagnostic([BuildDiagnostic UnresolvedEntry a.ts, BuildDiagnostic UnresolvedImport b.ts])",
        ));
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedEntry);
        assert_eq!(diags[1].kind, DiagnosticKind::UnresolvedImport);
    }

    #[test]
    fn test_warning_severity() {
        let warning = extract_warning(&FakeError("CircularDependency a.js -> b.js"));
        assert_eq!(warning.severity, DiagnosticSeverity::Warning);
        assert_eq!(warning.kind, DiagnosticKind::CircularDependency);
        assert!(!warning.is_error());
    }

    #[test]
    fn test_display_includes_location() {
        let mut diag = Diagnostic::error(DiagnosticKind::ParseError, "bad token");
        diag.file = Some("src/index.tsx".to_string());
        diag.line = Some(3);
        assert_eq!(diag.to_string(), "[ParseError] bad token (src/index.tsx:3)");
    }
}
