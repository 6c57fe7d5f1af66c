mod common;

use accessck::check_unit;
use accessck::diagnostics::{Diagnostic, DiagnosticKind, FixIt, RuleId, Severity};
use accessck::tree::{AccessLevel, MemberKind};
use common::{parse, pos};

fn check(src: &str) -> Vec<Diagnostic> {
    check_unit(&parse(src))
}

fn fixed(src: &str, diag: &Diagnostic) -> String {
    FixIt::apply_all(src, &diag.fix_its)
}

#[test]
fn non_objc_method_in_extension_warns() {
    let src = "class C {}\nextension C {\n  open func f() { }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    let d = &diags[0];
    assert_eq!(d.kind, DiagnosticKind::NonObjcOpenInExtension { member: MemberKind::Method });
    assert_eq!(d.severity, Severity::Warning);
    assert_eq!(pos(src, d.span), (3, 3));
    assert_eq!(fixed(src, d), "class C {}\nextension C {\n  public func f() { }\n}\n");
}

#[test]
fn non_objc_property_in_extension_warns() {
    let src = "class C {}\nextension C {\n  open var v: Int { 3 }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].message,
        "non-'@objc' properties in extensions cannot be overridden; use 'public' instead"
    );
}

#[test]
fn objc_members_class_allows_open_in_extension() {
    let src = "@objcMembers\nopen class C { }\nextension C {\n  open func f() { }\n  open var v: Int { 3 }\n}\n";
    assert!(check(src).is_empty());
}

#[test]
fn explicit_objc_allows_open_in_extension() {
    let src = "class C {}\nextension C {\n  @objc open func f() { }\n  @objc open var v: Int { 3 }\n}\n";
    assert!(check(src).is_empty());
}

#[test]
fn open_in_class_body_is_always_valid() {
    let src = "open class C {\n  open func f() { }\n  open var v: Int { 3 }\n}\n";
    assert!(check(src).is_empty());
}

#[test]
fn public_extension_conflict_wins_over_objc() {
    let src = "class C {}\npublic extension C {\n  @objc open func f() { }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule(), RuleId::OpenConflictsWithExtensionAccess);
    assert_eq!(
        diags[0].message,
        "'open' modifier conflicts with extension's default access of 'public'"
    );
    assert_eq!(pos(src, diags[0].span), (3, 9));
}

#[test]
fn public_extension_conflict_wins_over_non_objc() {
    let src = "class C {}\npublic extension C {\n  open func f() { }\n  open var v: Int { 3 }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(|d| d.rule() == RuleId::OpenConflictsWithExtensionAccess));
    assert!(diags.iter().all(|d| d.fix_its.is_empty()));
}

#[test]
fn private_extension_conflict_names_level() {
    let src = "class C {}\nprivate extension C {\n  open func f() { }\n}\n";
    let diags = check(src);
    assert_eq!(
        diags[0].kind,
        DiagnosticKind::OpenConflictsWithExtensionAccess { extension_access: AccessLevel::Private }
    );
}

#[test]
fn open_extension_on_plain_class() {
    let src = "class C { }\nopen extension C {\n  func f() { }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    let d = &diags[0];
    assert_eq!(d.kind, DiagnosticKind::ExtensionCannotBeOpen);
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(pos(src, d.span), (2, 1));
    assert_eq!(fixed(src, d), "class C { }\nextension C {\n  public func f() { }\n}\n");
}

#[test]
fn open_extension_fix_its_follow_visibility() {
    let src = "\
class K { }
open extension K {
  private func a() { }
  @objc func b() { }
  func c() { }
  @objc var e: Int { 3 }
  var f: Int { 3 }
}
";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        fixed(src, &diags[0]),
        "\
class K { }
extension K {
  private func a() { }
  @objc open func b() { }
  public func c() { }
  @objc open var e: Int { 3 }
  public var f: Int { 3 }
}
"
    );
}

#[test]
fn open_extension_on_objc_members_class_inserts_open() {
    let src = "\
@objc
@objcMembers
class K: NSObject { }
open extension K {
  func c() { }
  var f: Int { 3 }
  private var g: Int { 3 }
}
";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    let inserted: Vec<_> = diags[0].fix_its.iter().skip(1).map(|f| f.replacement.as_str()).collect();
    assert_eq!(inserted, vec!["open ", "open "]);
}

#[test]
fn open_member_inside_open_extension_is_not_reported_again() {
    let src = "class K { }\nopen extension K {\n  open func f() { }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule(), RuleId::ExtensionCannotBeOpen);
    assert_eq!(diags[0].fix_its.len(), 1);
}

#[test]
fn each_open_extension_reports_once() {
    let src = "class K { }\nopen extension K {\n  func f() { }\n}\nopen extension K {\n  func g() { }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 2);
    assert_eq!(pos(src, diags[0].span), (2, 1));
    assert_eq!(pos(src, diags[1].span), (5, 1));
}

#[test]
fn inherited_objc_members_reaches_extension() {
    let src = "@objcMembers\nclass Base { }\nclass Derived: Base { }\nextension Derived {\n  open func f() { }\n}\n";
    assert!(check(src).is_empty());
}

#[test]
fn nonobjc_member_of_objc_members_class_warns() {
    let src = "@objcMembers\nopen class C { }\nextension C {\n  @nonobjc open func f() { }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule(), RuleId::NonObjcOpenInExtension);
    assert_eq!(pos(src, diags[0].span), (4, 12));
}

#[test]
fn objc_extension_makes_members_visible() {
    let src = "class C { }\n@objc extension C {\n  open func f() { }\n}\n";
    assert!(check(src).is_empty());
}

#[test]
fn extension_of_unknown_type_uses_explicit_flags_only() {
    let src = "extension Remote {\n  open func f() { }\n  @objc open func g() { }\n}\n";
    let diags = check(src);
    assert_eq!(diags.len(), 1);
    assert_eq!(pos(src, diags[0].span), (2, 3));
}
