use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::span::Span;
use crate::tree::{AccessLevel, MemberKind};

/// Failures outside the checker itself: reading trees, configs and sources.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid declaration tree: {msg}")]
    Tree { msg: String, path: PathBuf },

    #[error("config error: {msg}")]
    Config { msg: String, path: PathBuf },

    #[error("unsupported tree format for {} (expected .json or .toml)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl CheckError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn tree(msg: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Tree { msg: msg.into(), path: path.into() }
    }

    pub fn config(msg: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config { msg: msg.into(), path: path.into() }
    }

    /// The file the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            CheckError::Io { path, .. }
            | CheckError::Tree { path, .. }
            | CheckError::Config { path, .. }
            | CheckError::UnsupportedFormat { path } => path.as_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Stable identifier for each access rule, as used in config files and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    ExtensionCannotBeOpen,
    OpenConflictsWithExtensionAccess,
    NonObjcOpenInExtension,
}

impl RuleId {
    pub const ALL: [RuleId; 3] = [
        RuleId::ExtensionCannotBeOpen,
        RuleId::OpenConflictsWithExtensionAccess,
        RuleId::NonObjcOpenInExtension,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RuleId::ExtensionCannotBeOpen => "extension-cannot-be-open",
            RuleId::OpenConflictsWithExtensionAccess => "open-conflicts-with-extension-access",
            RuleId::NonObjcOpenInExtension => "non-objc-open-in-extension",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }

    pub fn default_severity(self) -> Severity {
        match self {
            RuleId::ExtensionCannotBeOpen => Severity::Error,
            RuleId::OpenConflictsWithExtensionAccess | RuleId::NonObjcOpenInExtension => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// `open extension`; members must be made `open` individually.
    ExtensionCannotBeOpen,
    /// `open` member inside an extension whose default access is lower.
    OpenConflictsWithExtensionAccess { extension_access: AccessLevel },
    /// `open` member in an extension that Objective-C cannot dispatch to.
    NonObjcOpenInExtension { member: MemberKind },
}

impl DiagnosticKind {
    pub fn rule(&self) -> RuleId {
        match self {
            DiagnosticKind::ExtensionCannotBeOpen => RuleId::ExtensionCannotBeOpen,
            DiagnosticKind::OpenConflictsWithExtensionAccess { .. } => {
                RuleId::OpenConflictsWithExtensionAccess
            }
            DiagnosticKind::NonObjcOpenInExtension { .. } => RuleId::NonObjcOpenInExtension,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DiagnosticKind::ExtensionCannotBeOpen => {
                "extensions cannot be declared 'open'; declare individual members as 'open' instead"
                    .to_string()
            }
            DiagnosticKind::OpenConflictsWithExtensionAccess { extension_access } => format!(
                "'open' modifier conflicts with extension's default access of '{extension_access}'"
            ),
            DiagnosticKind::NonObjcOpenInExtension { member } => format!(
                "non-'@objc' {} in extensions cannot be overridden; use 'public' instead",
                member.plural()
            ),
        }
    }
}

/// A suggested source edit: replace `span` with `replacement`.
/// Empty spans are insertions, empty replacements are deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixIt {
    pub span: Span,
    pub replacement: String,
}

impl FixIt {
    pub fn replace(span: Span, replacement: impl Into<String>) -> Self {
        Self { span, replacement: replacement.into() }
    }

    pub fn insert(at: Span, text: impl Into<String>) -> Self {
        Self { span: at.at(at.start), replacement: text.into() }
    }

    pub fn remove(span: Span) -> Self {
        Self { span, replacement: String::new() }
    }

    /// Apply a set of fix-its to `source`. Overlapping edits and edits that
    /// split a character are skipped.
    pub fn apply_all(source: &str, fix_its: &[FixIt]) -> String {
        let mut edits: Vec<&FixIt> = fix_its.iter().collect();
        edits.sort_by_key(|f| (f.span.start, f.span.end));
        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in edits {
            let start = edit.span.start.min(source.len());
            let end = edit.span.end.clamp(start, source.len());
            if start < cursor || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
                continue;
            }
            out.push_str(&source[cursor..start]);
            out.push_str(&edit.replacement);
            cursor = end;
        }
        out.push_str(&source[cursor..]);
        out
    }
}

impl fmt::Display for FixIt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_empty() {
            write!(f, "insert '{}' at {}", self.replacement, self.span.start)
        } else if self.replacement.is_empty() {
            write!(f, "remove {}..{}", self.span.start, self.span.end)
        } else {
            write!(f, "replace {}..{} with '{}'", self.span.start, self.span.end, self.replacement)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub span: Span,
    pub message: String,
    pub fix_its: Vec<FixIt>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            severity: kind.rule().default_severity(),
            message: kind.message(),
            kind,
            span,
            fix_its: Vec::new(),
        }
    }

    pub fn with_fix_it(mut self, fix_it: FixIt) -> Self {
        self.fix_its.push(fix_it);
        self
    }

    pub fn with_fix_its(mut self, fix_its: impl IntoIterator<Item = FixIt>) -> Self {
        self.fix_its.extend(fix_its);
        self
    }

    pub fn rule(&self) -> RuleId {
        self.kind.rule()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.rule(), self.message)
    }
}

/// Render a diagnostic with ariadne against its source text.
pub fn render_diagnostic(source: &str, diag: &Diagnostic, color: bool) -> String {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };
    let start = diag.span.start.min(source.len());
    let end = diag.span.end.clamp(start, source.len());

    let mut report = Report::build(kind, (), start)
        .with_config(Config::default().with_color(color))
        .with_code(diag.rule())
        .with_message(&diag.message)
        .with_label(Label::new(start..end).with_message(diag.rule().code()));
    if !diag.fix_its.is_empty() {
        let help = diag
            .fix_its
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        report = report.with_help(format!("fix-it: {help}"));
    }

    let mut out = Vec::new();
    if report.finish().write(Source::from(source), &mut out).is_err() {
        return format!("{diag}\n");
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// One-line rendering used when no source text is available.
pub fn render_plain(path: &str, diag: &Diagnostic) -> String {
    format!("{path}:{}: {diag}", diag.span.start)
}
