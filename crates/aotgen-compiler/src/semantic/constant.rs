//! Constant evaluation of attribute arguments and enum member values.

use super::binder::{Binder, Context, Found, Unresolved};
use super::symbols::{MemberKind, TypeDefId, TypeKind, TypedConstant};
use crate::parser::ast::Expr;
use crate::parser::cst::SyntaxKind;

impl Binder {
    pub(super) fn eval_constant(
        &self,
        expr: &Expr,
        ctx: &Context,
        errors: &mut Vec<Unresolved>,
    ) -> TypedConstant {
        match expr {
            Expr::Typeof(typeof_expr) => match typeof_expr.type_ref() {
                Some(type_ref) => {
                    let ty = self.resolve_type(&type_ref, ctx, None, errors);
                    if ty.is_error() {
                        TypedConstant::Error
                    } else {
                        TypedConstant::Type(ty)
                    }
                }
                None => TypedConstant::Error,
            },
            Expr::Literal(literal) => literal
                .token()
                .map_or(TypedConstant::Error, |token| literal_value(token.kind(), token.text())),
            Expr::Name(name) => {
                let Some(token) = name.name() else {
                    return TypedConstant::Error;
                };
                self.constant_in_type_chain(token.text(), ctx)
                    .unwrap_or(TypedConstant::Error)
            }
            Expr::MemberAccess(access) => {
                let Some(member) = access.member() else {
                    return TypedConstant::Error;
                };
                let Some(receiver) = access.receiver() else {
                    return TypedConstant::Error;
                };
                let Some(owner) = self.resolve_expr_type(&receiver, ctx) else {
                    return TypedConstant::Error;
                };
                self.constant_of(owner, member.text())
                    .unwrap_or(TypedConstant::Error)
            }
            Expr::Binary(binary) => {
                let (Some(lhs), Some(rhs), Some(op)) = (binary.lhs(), binary.rhs(), binary.op())
                else {
                    return TypedConstant::Error;
                };
                let lhs = self.eval_constant(&lhs, ctx, errors);
                let rhs = self.eval_constant(&rhs, ctx, errors);
                binary_op(op.text(), lhs, rhs)
            }
            Expr::Paren(paren) => paren
                .inner()
                .map_or(TypedConstant::Error, |inner| self.eval_constant(&inner, ctx, errors)),
            Expr::Prefix(prefix) => {
                let (Some(op), Some(operand)) = (prefix.op(), prefix.operand()) else {
                    return TypedConstant::Error;
                };
                let operand = self.eval_constant(&operand, ctx, errors);
                prefix_op(op.text(), operand)
            }
            Expr::Nameof(nameof) => nameof
                .arg()
                .and_then(|arg| expr_path(&arg))
                .and_then(|path| path.last().cloned())
                .map_or(TypedConstant::Error, TypedConstant::String),
            Expr::Opaque(_) => TypedConstant::Error,
        }
    }

    /// `Member` as a bare name: a constant of the current type or a containing one.
    fn constant_in_type_chain(&self, name: &str, ctx: &Context) -> Option<TypedConstant> {
        let mut current = ctx.type_def;
        while let Some(id) = current {
            if let Some(value) = self.constant_of(id, name) {
                return Some(value);
            }
            current = self.table.get(id).containing;
        }
        None
    }

    fn constant_of(&self, owner: TypeDefId, name: &str) -> Option<TypedConstant> {
        let def = self.table.get(owner);
        let value = def.members.iter().find_map(|m| match &m.kind {
            MemberKind::Field(field) if m.name == name => field.constant,
            _ => None,
        })?;
        Some(match def.kind {
            TypeKind::Enum => TypedConstant::Enum { ty: owner, value },
            _ => TypedConstant::Int(value),
        })
    }

    /// Resolves `A.B.C` in expression position to the type it names.
    fn resolve_expr_type(&self, expr: &Expr, ctx: &Context) -> Option<TypeDefId> {
        let global = leftmost_is_global(expr);
        let path = expr_path(expr)?;
        let (first, rest) = path.split_first()?;

        let mut found = if global {
            self.lookup_member(&Found::Namespace(String::new()), first, 0)?
        } else {
            self.lookup_simple(first, 0, ctx)?
        };
        for segment in rest {
            found = self.lookup_member(&found, segment, 0)?;
        }
        match found {
            Found::Def(def) => Some(def),
            Found::Type(ty) => ty.def(),
            Found::Namespace(_) => None,
        }
    }
}

fn leftmost_is_global(expr: &Expr) -> bool {
    match expr {
        Expr::Name(name) => name.is_global(),
        Expr::MemberAccess(access) => access.receiver().is_some_and(|r| leftmost_is_global(&r)),
        _ => false,
    }
}

/// Identifier path of a dotted name expression.
fn expr_path(expr: &Expr) -> Option<Vec<String>> {
    match expr {
        Expr::Name(name) => Some(vec![name.name()?.text().trim_start_matches('@').to_string()]),
        Expr::MemberAccess(access) => {
            let mut path = expr_path(&access.receiver()?)?;
            path.push(access.member()?.text().trim_start_matches('@').to_string());
            Some(path)
        }
        _ => None,
    }
}

fn literal_value(kind: SyntaxKind, text: &str) -> TypedConstant {
    match kind {
        SyntaxKind::KwTrue => TypedConstant::Bool(true),
        SyntaxKind::KwFalse => TypedConstant::Bool(false),
        SyntaxKind::KwNull | SyntaxKind::KwDefault => TypedConstant::Null,
        SyntaxKind::NumberLiteral => parse_integer(text).map_or(TypedConstant::Error, TypedConstant::Int),
        SyntaxKind::StringLiteral => TypedConstant::String(string_value(text)),
        SyntaxKind::CharLiteral => {
            let inner = text
                .strip_prefix('\'')
                .and_then(|t| t.strip_suffix('\''))
                .unwrap_or(text);
            TypedConstant::String(unescape(inner))
        }
        _ => TypedConstant::Error,
    }
}

/// Integer literal value; real literals are not constants we care about.
pub(crate) fn parse_integer(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex.trim_end_matches(['u', 'l']), 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin.trim_end_matches(['u', 'l']), 2)
    } else {
        if lower.contains(['.', 'e', 'f', 'd', 'm']) {
            return None;
        }
        (lower.trim_end_matches(['u', 'l']), 10)
    };
    u64::from_str_radix(digits, radix).ok().map(|v| v as i64)
}

fn string_value(text: &str) -> String {
    if let Some(raw) = text.strip_prefix("\"\"\"") {
        return raw.trim_end_matches('"').trim().to_string();
    }
    let verbatim = text.starts_with('@') || text.starts_with("$@") || text.starts_with("@$");
    let body = text.trim_start_matches(['@', '$']);
    let body = body
        .strip_prefix('"')
        .and_then(|b| b.strip_suffix('"'))
        .unwrap_or(body);
    if verbatim {
        body.replace("\"\"", "\"")
    } else {
        unescape(body)
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let code: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&code, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&code);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn binary_op(op: &str, lhs: TypedConstant, rhs: TypedConstant) -> TypedConstant {
    use TypedConstant::*;

    match (lhs, rhs) {
        (Enum { ty, value: a }, Enum { ty: other, value: b }) if ty == other => {
            match int_op(op, a, b) {
                Some(value) => Enum { ty, value },
                None => Error,
            }
        }
        (Enum { ty, value: a }, Int(b)) | (Int(a), Enum { ty, value: b }) => {
            match int_op(op, a, b) {
                Some(value) => Enum { ty, value },
                None => Error,
            }
        }
        (Int(a), Int(b)) => int_op(op, a, b).map_or(Error, Int),
        (Bool(a), Bool(b)) => match op {
            "|" | "||" => Bool(a || b),
            "&" | "&&" => Bool(a && b),
            "^" => Bool(a ^ b),
            _ => Error,
        },
        (String(a), String(b)) if op == "+" => String(a + &b),
        _ => Error,
    }
}

fn int_op(op: &str, a: i64, b: i64) -> Option<i64> {
    Some(match op {
        "|" => a | b,
        "&" => a & b,
        "^" => a ^ b,
        "+" => a.wrapping_add(b),
        "-" => a.wrapping_sub(b),
        "*" => a.wrapping_mul(b),
        "/" => a.checked_div(b)?,
        "%" => a.checked_rem(b)?,
        "<<" => a.checked_shl(u32::try_from(b).ok()?)?,
        _ => return None,
    })
}

fn prefix_op(op: &str, operand: TypedConstant) -> TypedConstant {
    match (op, operand) {
        ("-", TypedConstant::Int(v)) => TypedConstant::Int(v.wrapping_neg()),
        ("+", value @ TypedConstant::Int(_)) => value,
        ("~", TypedConstant::Int(v)) => TypedConstant::Int(!v),
        ("~", TypedConstant::Enum { ty, value }) => TypedConstant::Enum { ty, value: !value },
        ("!", TypedConstant::Bool(b)) => TypedConstant::Bool(!b),
        _ => TypedConstant::Error,
    }
}
