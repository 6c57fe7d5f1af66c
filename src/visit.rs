//! Declaration tree visitor infrastructure
//!
//! `Visitor` is a read-only traversal over a `SourceUnit`. Implement it for a
//! pass, override only the methods you need, and call the matching `walk_*`
//! function inside an override to keep the default recursion.
//!
//! ```rust
//! use accessck::visit::{Visitor, walk_class};
//! use accessck::tree::ClassDecl;
//!
//! struct ClassNames(Vec<String>);
//!
//! impl Visitor for ClassNames {
//!     fn visit_class(&mut self, class: &ClassDecl) {
//!         self.0.push(class.name.node.clone());
//!         walk_class(self, class);
//!     }
//! }
//! ```
//!
//! Traversal is always in source order: items top to bottom, members in the
//! order they appear in their body.

use crate::tree::*;

// ============================================================================
// Visitor Trait (Read-Only)
// ============================================================================

/// Read-only tree visitor. Default implementations recurse into all children.
pub trait Visitor: Sized {
    fn visit_unit(&mut self, unit: &SourceUnit) {
        walk_unit(self, unit);
    }

    fn visit_item(&mut self, item: &Item) {
        walk_item(self, item);
    }

    fn visit_class(&mut self, class: &ClassDecl) {
        walk_class(self, class);
    }

    fn visit_extension(&mut self, ext: &ExtensionDecl) {
        walk_extension(self, ext);
    }

    fn visit_member(&mut self, _member: &MemberDecl) {}
}

// ============================================================================
// Walk Functions
// ============================================================================

pub fn walk_unit<V: Visitor>(v: &mut V, unit: &SourceUnit) {
    for item in &unit.items {
        v.visit_item(item);
    }
}

pub fn walk_item<V: Visitor>(v: &mut V, item: &Item) {
    match item {
        Item::Class(class) => v.visit_class(class),
        Item::Extension(ext) => v.visit_extension(ext),
    }
}

pub fn walk_class<V: Visitor>(v: &mut V, class: &ClassDecl) {
    for member in &class.members {
        v.visit_member(member);
    }
}

pub fn walk_extension<V: Visitor>(v: &mut V, ext: &ExtensionDecl) {
    for member in &ext.members {
        v.visit_member(member);
    }
}
