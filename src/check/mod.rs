//! The access consistency checker.
//!
//! For every declaration written `open`, the guards in [`rules::RULES`] run in
//! priority order and the first applicable one decides the outcome:
//!
//! 1. `open extension`: one error per extension, with fix-its that drop the
//!    keyword and give each member `open` or `public` by Objective-C visibility.
//! 2. `open` member of an extension whose default access is lower: warning.
//! 3. `open` member of an extension that is not Objective-C visible: warning
//!    with an `open` to `public` fix-it.
//!
//! Anything else written `open` is valid. The pass reads the declaration table
//! only and reports in source order.

pub mod rules;

use tracing::debug;

use crate::decls::DeclTable;
use crate::diagnostics::Diagnostic;
use crate::tree::SourceUnit;

pub use rules::{evaluate, Verdict, RULES};

pub fn check_access(table: &DeclTable) -> Vec<Diagnostic> {
    let diagnostics: Vec<Diagnostic> = table
        .iter()
        .filter(|d| d.is_open())
        .filter_map(|d| evaluate(table, d))
        .collect();
    debug!(
        declarations = table.len(),
        diagnostics = diagnostics.len(),
        "access check finished"
    );
    diagnostics
}

/// Build the declaration table for `unit` and check it.
pub fn check_unit(unit: &SourceUnit) -> Vec<Diagnostic> {
    check_access(&DeclTable::build(unit))
}
