//! Parser infrastructure for C# declarations.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: member kinds are decided after attributes and modifiers
//! - Explicit recovery sets: per-production sets determine when to bail vs consume diagnostics
//!
//! Only the declaration surface is structured. Method bodies, expression bodies and
//! non-constant initializers are kept as balanced token runs.
//!
//! # Recovery Strategy
//!
//! The parser is resilient - it always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Recovery sets define "synchronization points" per production
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod cst_tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use core::Parser;

use crate::PassResult;
use crate::source_map::SourceId;
use lexer::lex;

/// Parse result containing the green tree.
///
/// The tree is always complete - diagnostics are returned separately.
/// Error nodes in the tree represent recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    /// Creates a typed view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> Option<ast::Root> {
        ast::Root::cast(self.syntax())
    }
}

/// Default fuel limits, generous enough for any hand-written source.
pub const DEFAULT_EXEC_FUEL: u32 = 10_000_000;
pub const DEFAULT_RECURSION_FUEL: u32 = 512;

/// Main entry point. Returns Err on fuel exhaustion.
pub fn parse(source: &str, source_id: SourceId) -> PassResult<Parse> {
    parse_with_parser(
        Parser::new(source, source_id, lex(source))
            .with_exec_fuel(Some(DEFAULT_EXEC_FUEL))
            .with_recursion_fuel(Some(DEFAULT_RECURSION_FUEL)),
    )
}

/// Parse with a pre-configured parser (for custom fuel limits).
pub(crate) fn parse_with_parser(mut parser: Parser) -> PassResult<Parse> {
    parser.parse_root();
    let (cst, diagnostics) = parser.finish()?;
    Ok((Parse { cst }, diagnostics))
}

/// Indented dump of the tree without trivia: nodes by kind, tokens as `Kind "text"`.
pub fn dump_cst(node: &SyntaxNode) -> String {
    let mut out = String::new();
    dump_node(node, 0, &mut out);
    out
}

fn dump_node(node: &SyntaxNode, depth: usize, out: &mut String) {
    use std::fmt::Write;

    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{}{:?}", indent, node.kind());
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => dump_node(&n, depth + 1, out),
            rowan::NodeOrToken::Token(t) => {
                if t.kind().is_trivia() {
                    continue;
                }
                let _ = writeln!(out, "{}  {:?} {:?}", indent, t.kind(), t.text());
            }
        }
    }
}
