pub mod span;
pub mod diagnostics;
pub mod tree;
pub mod visit;
pub mod decls;
pub mod check;
pub mod config;
pub mod report;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use config::Config;
use diagnostics::{CheckError, Diagnostic};
use report::CheckReport;

pub use check::{check_access, check_unit};

/// Result of checking one declaration tree file.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub path: PathBuf,
    /// Diagnostics after the config policy, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Text of the original source file, when known.
    pub source: Option<String>,
}

impl CheckOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn report(&self) -> CheckReport {
        CheckReport::new(&self.path, &self.diagnostics, self.source.as_deref())
    }

    /// Human-readable output: ariadne reports when the source is known,
    /// one line per diagnostic otherwise.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            match &self.source {
                Some(src) => out.push_str(&diagnostics::render_diagnostic(src, diag, color)),
                None => {
                    out.push_str(&diagnostics::render_plain(&self.path.display().to_string(), diag));
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Load a tree file, check it and apply `config`.
///
/// `source` overrides the source path recorded in the tree and must be
/// readable. A recorded path is optional: relative paths resolve against the
/// tree file's directory, and an unreadable one only drops positions.
pub fn check_file(path: &Path, config: &Config, source: Option<&Path>) -> Result<CheckOutcome, CheckError> {
    let unit = tree::load::load_tree(path)?;

    let source_text = match source {
        Some(p) => Some(std::fs::read_to_string(p).map_err(|e| CheckError::io(p, e))?),
        None => unit.source.as_ref().and_then(|p| {
            let p = if p.is_relative() { path.parent().unwrap_or(Path::new(".")).join(p) } else { p.clone() };
            match std::fs::read_to_string(&p) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(source = %p.display(), error = %e, "cannot read recorded source; reporting without positions");
                    None
                }
            }
        }),
    };

    let diagnostics = config.apply(check_unit(&unit));
    info!(
        path = %path.display(),
        diagnostics = diagnostics.len(),
        errors = diagnostics.iter().filter(|d| d.is_error()).count(),
        "checked declaration tree"
    );

    Ok(CheckOutcome {
        path: path.to_path_buf(),
        diagnostics,
        source: source_text,
    })
}
