use tracing::trace;

use crate::decls::{Context, DeclKind, DeclTable, Declaration};
use crate::diagnostics::{Diagnostic, DiagnosticKind, FixIt, RuleId};
use crate::tree::AccessLevel;

/// Outcome of one guard for one `open` declaration.
#[derive(Debug, PartialEq)]
pub enum Verdict {
    /// This rule applies and produces a diagnostic.
    Emit(Diagnostic),
    /// This rule applies but the diagnostic is reported elsewhere.
    Settled,
    /// Not applicable; try the next rule.
    Continue,
}

pub type Rule = fn(&DeclTable, &Declaration) -> Verdict;

/// Guards in priority order. The first one that does not `Continue` decides.
pub const RULES: &[(RuleId, Rule)] = &[
    (RuleId::ExtensionCannotBeOpen, open_extension),
    (RuleId::OpenConflictsWithExtensionAccess, extension_access_conflict),
    (RuleId::NonObjcOpenInExtension, non_objc_in_extension),
];

/// Run the guards against a single `open` declaration.
pub fn evaluate(table: &DeclTable, decl: &Declaration) -> Option<Diagnostic> {
    for (rule, guard) in RULES {
        match guard(table, decl) {
            Verdict::Emit(diag) => {
                trace!(decl = %decl.name, %rule, "emit");
                return Some(diag);
            }
            Verdict::Settled => {
                trace!(decl = %decl.name, %rule, "settled");
                return None;
            }
            Verdict::Continue => {}
        }
    }
    None
}

/// `open extension`: one error on the extension, covering its members.
pub fn open_extension(table: &DeclTable, decl: &Declaration) -> Verdict {
    match decl.kind {
        DeclKind::Extension => {
            let Some(modifier) = decl.access else {
                return Verdict::Continue;
            };
            let insertions = table
                .members_of(decl.id)
                .filter(|m| !m.has_explicit_access())
                .map(|m| {
                    let level = if m.is_objc_visible() { AccessLevel::Open } else { AccessLevel::Public };
                    FixIt::insert(m.keyword, format!("{level} "))
                });
            Verdict::Emit(
                Diagnostic::new(DiagnosticKind::ExtensionCannotBeOpen, modifier.span)
                    .with_fix_it(FixIt::remove(modifier.removal_span()))
                    .with_fix_its(insertions),
            )
        }
        DeclKind::Method | DeclKind::Property if decl.context == Context::ExtensionBody => {
            match table.parent(decl) {
                Some(ext) if ext.is_open() => Verdict::Settled,
                _ => Verdict::Continue,
            }
        }
        _ => Verdict::Continue,
    }
}

/// `open` member inside an extension whose written default access is lower.
pub fn extension_access_conflict(_table: &DeclTable, decl: &Declaration) -> Verdict {
    if decl.context != Context::ExtensionBody {
        return Verdict::Continue;
    }
    let (Some(modifier), Some(default)) = (decl.access, decl.extension_default_access) else {
        return Verdict::Continue;
    };
    if default.level >= AccessLevel::Open {
        return Verdict::Continue;
    }
    Verdict::Emit(Diagnostic::new(
        DiagnosticKind::OpenConflictsWithExtensionAccess { extension_access: default.level },
        modifier.span,
    ))
}

/// `open` member in an extension that Objective-C cannot see.
pub fn non_objc_in_extension(_table: &DeclTable, decl: &Declaration) -> Verdict {
    if decl.context != Context::ExtensionBody || decl.is_objc_visible() {
        return Verdict::Continue;
    }
    let (Some(modifier), Some(member)) = (decl.access, decl.member_kind()) else {
        return Verdict::Continue;
    };
    Verdict::Emit(
        Diagnostic::new(DiagnosticKind::NonObjcOpenInExtension { member }, modifier.span)
            .with_fix_it(FixIt::replace(modifier.span, AccessLevel::Public.keyword())),
    )
}
