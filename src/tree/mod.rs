//! Input declaration tree.
//!
//! This is the shape an external front end hands to the checker: classes and
//! extensions in source order, each with its members, access modifiers and
//! interop attributes. Only the facts the access rules need are modelled.

pub mod load;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::span::{Span, Spanned};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Path of the source file the tree was parsed from, used for rendering.
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "lowercase")]
pub enum Item {
    Class(ClassDecl),
    Extension(ExtensionDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: Spanned<String>,
    #[serde(default)]
    pub access: Option<AccessModifier>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionDecl {
    pub extended: Spanned<String>,
    /// Default access written on the `extension` keyword itself.
    #[serde(default)]
    pub access: Option<AccessModifier>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: Spanned<String>,
    pub kind: MemberKind,
    #[serde(default)]
    pub access: Option<AccessModifier>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// The `func` / `var` keyword. Access fix-its are inserted at its start.
    pub keyword: Span,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Property,
}

impl MemberKind {
    pub fn plural(self) -> &'static str {
        match self {
            MemberKind::Method => "methods",
            MemberKind::Property => "properties",
        }
    }
}

/// Access levels, ordered from least to most visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Private,
    Fileprivate,
    Internal,
    Public,
    Open,
}

impl AccessLevel {
    pub fn keyword(self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::Fileprivate => "fileprivate",
            AccessLevel::Internal => "internal",
            AccessLevel::Public => "public",
            AccessLevel::Open => "open",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An access keyword as written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessModifier {
    pub level: AccessLevel,
    pub span: Span,
    /// Range a deletion fix-it removes, usually the keyword plus the
    /// whitespace after it. Falls back to `span`.
    #[serde(default)]
    pub removal: Option<Span>,
}

impl AccessModifier {
    pub fn new(level: AccessLevel, span: Span) -> Self {
        Self { level, span, removal: None }
    }

    pub fn removal_span(&self) -> Span {
        self.removal.unwrap_or(self.span)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "objc")]
    Objc,
    #[serde(rename = "objcMembers")]
    ObjcMembers,
    #[serde(rename = "nonobjc")]
    Nonobjc,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Objc => f.write_str("@objc"),
            Attribute::ObjcMembers => f.write_str("@objcMembers"),
            Attribute::Nonobjc => f.write_str("@nonobjc"),
        }
    }
}

pub(crate) fn has_attr(attrs: &[Attribute], attr: Attribute) -> bool {
    attrs.contains(&attr)
}
