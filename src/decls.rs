//! Declaration facts derived from the input tree.
//!
//! Every class, extension and member becomes one `Declaration` with its access
//! level and Objective-C visibility resolved up front. Implicit visibility from
//! `@objcMembers` (including inheritance through superclasses declared in the
//! same unit) is computed here, once, so the checker only reads flags.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, trace};

use crate::span::Span;
use crate::tree::*;
use crate::visit::{walk_class, walk_extension, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeclId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Class,
    Extension,
    Method,
    Property,
}

impl From<MemberKind> for DeclKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Method => DeclKind::Method,
            MemberKind::Property => DeclKind::Property,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Context {
    TopLevel,
    ClassBody,
    ExtensionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub id: DeclId,
    pub kind: DeclKind,
    pub name: String,
    /// Written access level, `internal` when none is written.
    pub access_level: AccessLevel,
    /// The written modifier, if any.
    pub access: Option<AccessModifier>,
    pub is_objc_explicit: bool,
    pub is_implicitly_objc: bool,
    pub context: Context,
    pub parent: Option<DeclId>,
    /// Access written on the enclosing `extension` keyword. For an extension
    /// declaration itself this is its own modifier.
    pub extension_default_access: Option<AccessModifier>,
    /// Where an access keyword for this declaration would be inserted.
    pub keyword: Span,
    pub span: Span,
}

impl Declaration {
    pub fn is_objc_visible(&self) -> bool {
        self.is_objc_explicit || self.is_implicitly_objc
    }

    pub fn is_open(&self) -> bool {
        self.access_level == AccessLevel::Open
    }

    pub fn has_explicit_access(&self) -> bool {
        self.access.is_some()
    }

    pub fn is_member(&self) -> bool {
        matches!(self.kind, DeclKind::Method | DeclKind::Property)
    }

    pub fn member_kind(&self) -> Option<MemberKind> {
        match self.kind {
            DeclKind::Method => Some(MemberKind::Method),
            DeclKind::Property => Some(MemberKind::Property),
            DeclKind::Class | DeclKind::Extension => None,
        }
    }
}

/// All declarations of a unit, in source order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeclTable {
    decls: Vec<Declaration>,
}

impl DeclTable {
    pub fn build(unit: &SourceUnit) -> Self {
        let mut index = ClassIndex::default();
        index.visit_unit(unit);

        let mut builder = TableBuilder { classes: &index, decls: Vec::new(), scope: None };
        builder.visit_unit(unit);

        debug!(
            classes = index.classes.len(),
            declarations = builder.decls.len(),
            "built declaration table"
        );
        Self { decls: builder.decls }
    }

    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.0)
    }

    pub fn parent(&self, decl: &Declaration) -> Option<&Declaration> {
        decl.parent.and_then(|p| self.get(p))
    }

    /// Members directly follow their type in the table.
    pub fn members_of(&self, id: DeclId) -> impl Iterator<Item = &Declaration> {
        self.decls
            .iter()
            .skip(id.0 + 1)
            .take_while(move |d| d.parent == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

// ============================================================================
// Class index: first pass
// ============================================================================

#[derive(Debug, Default)]
struct ClassFacts {
    objc_members: bool,
    superclass: Option<String>,
}

#[derive(Debug, Default)]
struct ClassIndex {
    classes: HashMap<String, ClassFacts>,
}

impl ClassIndex {
    /// Whether `name` or any superclass declared in the unit is `@objcMembers`.
    fn objc_members(&self, name: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(name);
        while let Some(class_name) = current {
            if !seen.insert(class_name) {
                debug!(class = name, "superclass cycle while resolving @objcMembers");
                return false;
            }
            let Some(facts) = self.classes.get(class_name) else {
                return false;
            };
            if facts.objc_members {
                return true;
            }
            current = facts.superclass.as_deref();
        }
        false
    }
}

impl Visitor for ClassIndex {
    fn visit_class(&mut self, class: &ClassDecl) {
        // First declaration of a name wins.
        self.classes.entry(class.name.node.clone()).or_insert_with(|| ClassFacts {
            objc_members: has_attr(&class.attributes, Attribute::ObjcMembers),
            superclass: class.superclass.clone(),
        });
    }
}

// ============================================================================
// Table builder: second pass
// ============================================================================

struct Scope {
    parent: DeclId,
    context: Context,
    members_objc: bool,
    extension_access: Option<AccessModifier>,
}

struct TableBuilder<'a> {
    classes: &'a ClassIndex,
    decls: Vec<Declaration>,
    scope: Option<Scope>,
}

impl TableBuilder<'_> {
    fn push(&mut self, make: impl FnOnce(DeclId) -> Declaration) -> DeclId {
        let id = DeclId(self.decls.len());
        let decl = make(id);
        trace!(
            id = id.0,
            name = %decl.name,
            access = %decl.access_level,
            objc = decl.is_objc_visible(),
            "declaration"
        );
        self.decls.push(decl);
        id
    }
}

impl Visitor for TableBuilder<'_> {
    fn visit_class(&mut self, class: &ClassDecl) {
        let objc_members = self.classes.objc_members(&class.name.node);
        let explicit = has_attr(&class.attributes, Attribute::Objc);
        let id = self.push(|id| Declaration {
            id,
            kind: DeclKind::Class,
            name: class.name.node.clone(),
            access_level: level_of(class.access),
            access: class.access,
            is_objc_explicit: explicit,
            is_implicitly_objc: explicit || objc_members,
            context: Context::TopLevel,
            parent: None,
            extension_default_access: None,
            keyword: class.span.at(class.span.start),
            span: class.span,
        });

        self.scope = Some(Scope {
            parent: id,
            context: Context::ClassBody,
            members_objc: objc_members,
            extension_access: None,
        });
        walk_class(self, class);
        self.scope = None;
    }

    fn visit_extension(&mut self, ext: &ExtensionDecl) {
        let extended = &ext.extended.node;
        if !self.classes.classes.contains_key(extended) {
            debug!(extended = %extended, "extension of a type outside this unit; no implicit @objc");
        }
        let explicit = has_attr(&ext.attributes, Attribute::Objc);
        let id = self.push(|id| Declaration {
            id,
            kind: DeclKind::Extension,
            name: extended.clone(),
            access_level: level_of(ext.access),
            access: ext.access,
            is_objc_explicit: explicit,
            is_implicitly_objc: explicit,
            context: Context::TopLevel,
            parent: None,
            extension_default_access: ext.access,
            keyword: ext.span.at(ext.span.start),
            span: ext.span,
        });

        self.scope = Some(Scope {
            parent: id,
            context: Context::ExtensionBody,
            members_objc: explicit || self.classes.objc_members(extended),
            extension_access: ext.access,
        });
        walk_extension(self, ext);
        self.scope = None;
    }

    fn visit_member(&mut self, member: &MemberDecl) {
        let Some(scope) = &self.scope else {
            return;
        };
        let (parent, context, members_objc, extension_access) =
            (scope.parent, scope.context, scope.members_objc, scope.extension_access);

        let explicit = has_attr(&member.attributes, Attribute::Objc);
        let suppressed = has_attr(&member.attributes, Attribute::Nonobjc);
        self.push(|id| Declaration {
            id,
            kind: member.kind.into(),
            name: member.name.node.clone(),
            access_level: level_of(member.access),
            access: member.access,
            is_objc_explicit: explicit,
            is_implicitly_objc: explicit || (members_objc && !suppressed),
            context,
            parent: Some(parent),
            extension_default_access: extension_access,
            keyword: member.keyword,
            span: member.span,
        });
    }
}

fn level_of(access: Option<AccessModifier>) -> AccessLevel {
    access.map(|a| a.level).unwrap_or(AccessLevel::Internal)
}
