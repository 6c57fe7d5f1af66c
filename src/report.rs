//! Serialisable check results.
//!
//! These types are what the JSON output mode emits and what an external
//! expectation harness consumes. Positions are byte offsets plus, when the
//! source text is available, 1-based line and column.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, FixIt, Severity};
use crate::span::{LineIndex, Span};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub success: bool,
    pub path: PathBuf,
    pub errors: Vec<ReportDiagnostic>,
    pub warnings: Vec<ReportDiagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDiagnostic {
    pub code: String,
    pub message: String,
    pub severity: Severity,
    pub span: ReportSpan,
    pub fix_its: Vec<ReportFixIt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSpan {
    pub start: usize,
    pub end: usize,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFixIt {
    pub span: ReportSpan,
    pub replacement: String,
}

impl CheckReport {
    pub fn new(path: impl Into<PathBuf>, diagnostics: &[Diagnostic], source: Option<&str>) -> Self {
        let index = source.map(LineIndex::new);
        let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics
            .iter()
            .map(|d| ReportDiagnostic::from_diagnostic(d, index.as_ref()))
            .partition(|d| d.severity == Severity::Error);
        Self {
            success: errors.is_empty(),
            path: path.into(),
            errors,
            warnings,
        }
    }
}

impl ReportDiagnostic {
    pub fn from_diagnostic(diag: &Diagnostic, index: Option<&LineIndex>) -> Self {
        Self {
            code: diag.rule().code().to_string(),
            message: diag.message.clone(),
            severity: diag.severity,
            span: ReportSpan::from_span(diag.span, index),
            fix_its: diag.fix_its.iter().map(|f| ReportFixIt::from_fix_it(f, index)).collect(),
        }
    }
}

impl ReportFixIt {
    fn from_fix_it(fix_it: &FixIt, index: Option<&LineIndex>) -> Self {
        Self {
            span: ReportSpan::from_span(fix_it.span, index),
            replacement: fix_it.replacement.clone(),
        }
    }
}

impl ReportSpan {
    fn from_span(span: Span, index: Option<&LineIndex>) -> Self {
        let pos = index.map(|idx| idx.line_col(span.start));
        Self {
            start: span.start,
            end: span.end,
            line: pos.map(|p| p.line),
            column: pos.map(|p| p.column),
        }
    }
}
