#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Command;

use accessck::span::{LineIndex, Span, Spanned};
use accessck::tree::*;

pub fn accessck() -> Command {
    Command::new(env!("CARGO_BIN_EXE_accessck"))
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Build a declaration tree from Swift-like test source.
///
/// Handles the line-oriented shapes the tests use: a declaration header per
/// line, members one per line, attributes either inline or on their own line
/// above a type, and `}` alone on a line closing a body.
pub fn parse(src: &str) -> SourceUnit {
    let mut items: Vec<Item> = Vec::new();
    let mut pending: Vec<Attribute> = Vec::new();
    let mut pending_start: Option<usize> = None;
    let mut in_body = false;
    let mut offset = 0;

    for line in src.split_inclusive('\n') {
        let base = offset;
        offset += line.len();
        let body = line.trim_end();
        let trimmed = body.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("import") {
            continue;
        }
        if trimmed == "}" {
            let end = base + body.len();
            match items.last_mut() {
                Some(Item::Class(c)) => c.span.end = end,
                Some(Item::Extension(e)) => e.span.end = end,
                None => {}
            }
            in_body = false;
            continue;
        }

        let toks = words(body);
        if toks.len() == 1 && toks[0].0.starts_with('@') {
            pending.push(attribute(toks[0].0));
            pending_start.get_or_insert(base + toks[0].1);
            continue;
        }

        let mut attrs = std::mem::take(&mut pending);
        let start = pending_start.take().unwrap_or(base + toks[0].1);
        let mut access = None;
        let mut idx = 0;
        loop {
            let (tok, col) = toks[idx];
            if tok.starts_with('@') {
                attrs.push(attribute(tok));
            } else if let Some(level) = access_level(tok) {
                let mut end = col + tok.len();
                while body.as_bytes().get(end) == Some(&b' ') {
                    end += 1;
                }
                access = Some(AccessModifier {
                    level,
                    span: Span::new(base + col, base + col + tok.len()),
                    removal: Some(Span::new(base + col, base + end)),
                });
            } else {
                break;
            }
            idx += 1;
        }

        let (kw, kw_col) = toks[idx];
        let (name, name_col) = toks[idx + 1];
        let name = Spanned::new(name.to_string(), Span::new(base + name_col, base + name_col + name.len()));
        let one_line = body.ends_with('}');
        let span = Span::new(start, if one_line { base + body.len() } else { start });

        match kw {
            "class" => {
                let superclass = body
                    .split_once(':')
                    .and_then(|(_, rest)| words(rest).first().map(|(w, _)| w.to_string()));
                items.push(Item::Class(ClassDecl {
                    name,
                    access,
                    attributes: attrs,
                    superclass,
                    members: vec![],
                    span,
                }));
                in_body = !one_line;
            }
            "extension" => {
                items.push(Item::Extension(ExtensionDecl {
                    extended: name,
                    access,
                    attributes: attrs,
                    members: vec![],
                    span,
                }));
                in_body = !one_line;
            }
            "func" | "var" => {
                assert!(in_body, "member outside a body: {body}");
                let member = MemberDecl {
                    name,
                    kind: if kw == "func" { MemberKind::Method } else { MemberKind::Property },
                    access,
                    attributes: attrs,
                    keyword: Span::new(base + kw_col, base + kw_col + kw.len()),
                    span: Span::new(base + toks[0].1, base + body.len()),
                };
                match items.last_mut() {
                    Some(Item::Class(c)) => c.members.push(member),
                    Some(Item::Extension(e)) => e.members.push(member),
                    None => unreachable!(),
                }
            }
            other => panic!("unexpected declaration keyword '{other}' in: {body}"),
        }
    }

    SourceUnit { source: None, items }
}

fn words(s: &str) -> Vec<(&str, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        let word_char = c.is_ascii_alphanumeric() || c == '_' || (c == '@' && start.is_none());
        match (word_char, start) {
            (true, None) => start = Some(i),
            (false, Some(st)) => {
                out.push((&s[st..i], st));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(st) = start {
        out.push((&s[st..], st));
    }
    out
}

fn attribute(tok: &str) -> Attribute {
    match tok {
        "@objc" => Attribute::Objc,
        "@objcMembers" => Attribute::ObjcMembers,
        "@nonobjc" => Attribute::Nonobjc,
        other => panic!("unknown attribute {other}"),
    }
}

fn access_level(tok: &str) -> Option<AccessLevel> {
    match tok {
        "private" => Some(AccessLevel::Private),
        "fileprivate" => Some(AccessLevel::Fileprivate),
        "internal" => Some(AccessLevel::Internal),
        "public" => Some(AccessLevel::Public),
        "open" => Some(AccessLevel::Open),
        _ => None,
    }
}

/// `line:column` of a span start, for comparing against expectation text.
pub fn pos(src: &str, span: Span) -> (usize, usize) {
    let lc = LineIndex::new(src).line_col(span.start);
    (lc.line, lc.column)
}
