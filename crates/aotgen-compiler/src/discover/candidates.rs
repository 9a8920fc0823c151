//! Syntax-only filter for schema classes.

use indexmap::IndexSet;
use rowan::TextRange;

use crate::diagnostics::Span;
use crate::parser::ast::{self, Item, Member, TypeDeclKind, TypeRef};
use crate::semantic::{Compilation, TypeDefId};
use crate::source_map::SourceId;

/// Simple names of the attributes that mark a schema class.
pub const MARKER_ATTRIBUTES: &[&str] = &[
    "AotQueryType",
    "AotMutationType",
    "AotSubscriptionType",
    "AotOutputType",
    "AotInputType",
    "AotGraphType",
    "AotTypeMapping",
    "AotListType",
    "AotRemapType",
];

/// A partial class carrying a marker attribute, paired with its symbol.
#[derive(Clone, Debug)]
pub struct CandidateClass {
    pub source: SourceId,
    pub syntax: ast::TypeDecl,
    pub symbol: TypeDefId,
}

impl CandidateClass {
    /// Span of the class name, or of the whole declaration.
    pub fn span(&self) -> Span {
        let range = self
            .syntax
            .name()
            .map(|n| n.text_range())
            .unwrap_or_else(|| self.syntax.as_cst().text_range());
        Span::new(self.source, range)
    }
}

/// Every candidate schema class in the user sources, in source order.
pub fn candidate_classes(compilation: &Compilation) -> Vec<CandidateClass> {
    let mut seen: IndexSet<(SourceId, TextRange)> = IndexSet::new();
    let mut out = Vec::new();
    for (source, root) in compilation.syntax_roots() {
        let mut decls = Vec::new();
        collect_type_decls(root.items(), &mut decls);
        for decl in decls {
            if !is_candidate(&decl) {
                continue;
            }
            if !seen.insert((source, decl.as_cst().text_range())) {
                continue;
            }
            let Some(symbol) = compilation.declared_type(source, &decl) else {
                continue;
            };
            out.push(CandidateClass {
                source,
                syntax: decl,
                symbol,
            });
        }
    }
    tracing::debug!(count = out.len(), "candidate schema classes");
    out
}

/// A partial class (or record class) with at least one marker attribute.
///
/// Looks at syntax only; the attribute names are not resolved.
pub fn is_candidate(decl: &ast::TypeDecl) -> bool {
    if decl.kind() != TypeDeclKind::Class {
        return false;
    }
    let is_partial = decl.modifiers().is_some_and(|m| m.has("partial"));
    if !is_partial {
        return false;
    }
    decl.attribute_lists()
        .filter(|list| list.target().is_none_or(|t| t == "type"))
        .flat_map(|list| list.attributes().collect::<Vec<_>>())
        .filter_map(|attribute| attribute.name())
        .any(|name| is_marker_name(&name))
}

fn is_marker_name(name: &TypeRef) -> bool {
    let Some(simple) = rightmost_identifier(name) else {
        return false;
    };
    let simple = simple.strip_suffix("Attribute").unwrap_or(&simple);
    MARKER_ATTRIBUTES.contains(&simple)
}

fn rightmost_identifier(name: &TypeRef) -> Option<String> {
    let simple = match name {
        TypeRef::Simple(simple) => simple.clone(),
        TypeRef::Qualified(qualified) => qualified.right()?,
        TypeRef::AliasQualified(alias) => alias.name()?,
        _ => return None,
    };
    Some(simple.name()?.text().trim_start_matches('@').to_string())
}

fn collect_type_decls(items: impl Iterator<Item = Item>, out: &mut Vec<ast::TypeDecl>) {
    for item in items {
        match item {
            Item::Namespace(ns) => collect_type_decls(ns.items(), out),
            Item::Type(decl) => collect_nested(decl, out),
            Item::Using(_) | Item::Delegate(_) => {}
        }
    }
}

fn collect_nested(decl: ast::TypeDecl, out: &mut Vec<ast::TypeDecl>) {
    let nested: Vec<_> = decl
        .members()
        .filter_map(|m| match m {
            Member::Type(t) => Some(t),
            _ => None,
        })
        .collect();
    out.push(decl);
    for inner in nested {
        collect_nested(inner, out);
    }
}
