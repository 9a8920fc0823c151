//! Constant expressions: the forms attribute arguments and enum values use.
//!
//! Anything outside that subset (calls, lambdas, object creation, casts) is wrapped
//! whole into an `OpaqueExpr` so declarations around it still parse.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{EXPR_END, LITERALS};

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_binary_expr(0);

        if !self.at_end() && !self.currently_is_one_of(EXPR_END) {
            self.start_node_at(checkpoint, SyntaxKind::OpaqueExpr);
            self.skip_opaque_expr();
            self.finish_node();
        }

        self.exit_recursion();
    }

    /// Consume tokens up to an expression terminator at nesting depth zero.
    /// `<`/`>` pairs are tracked so generic argument commas don't end the run.
    fn skip_opaque_expr(&mut self) {
        let mut angle_depth = 0u32;
        while !self.at_end() {
            let kind = self.current();
            if matches!(kind, SyntaxKind::Semicolon | SyntaxKind::BraceClose) {
                break;
            }
            if angle_depth == 0 && EXPR_END.contains(kind) {
                break;
            }
            match kind {
                SyntaxKind::Lt => angle_depth += 1,
                SyntaxKind::Gt => angle_depth = angle_depth.saturating_sub(1),
                _ => {}
            }
            self.bump_balanced();
        }
    }

    /// Precedence climbing over `| ^ & << + - * / %`, all left-associative.
    fn parse_binary_expr(&mut self, min_power: u8) -> bool {
        let checkpoint = self.checkpoint();
        if !self.parse_unary_expr() {
            if self.at_end() || self.currently_is_one_of(EXPR_END) {
                self.error_msg(DiagnosticKind::ExpectedExpression, "expected a value");
            }
            return false;
        }

        while let Some(power) = self.binary_power() {
            if power <= min_power {
                break;
            }
            self.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
            self.bump();
            self.parse_binary_expr(power);
            self.finish_node();
        }
        true
    }

    fn binary_power(&mut self) -> Option<u8> {
        let power = match self.current() {
            SyntaxKind::Pipe => 1,
            SyntaxKind::ShiftLeft => 4,
            SyntaxKind::Minus => 5,
            SyntaxKind::Operator => match self.current_text() {
                "^" => 2,
                "&" => 3,
                "+" => 5,
                "*" | "/" | "%" => 6,
                _ => return None,
            },
            _ => return None,
        };
        Some(power)
    }

    fn parse_unary_expr(&mut self) -> bool {
        let is_prefix = self.currently_is(SyntaxKind::Minus)
            || (self.currently_is(SyntaxKind::Operator)
                && matches!(self.current_text(), "~" | "!" | "+"));
        if !is_prefix {
            return self.parse_primary_expr();
        }

        self.start_node(SyntaxKind::PrefixExpr);
        self.bump();
        if !self.parse_unary_expr() && (self.at_end() || self.currently_is_one_of(EXPR_END)) {
            self.error_msg(DiagnosticKind::ExpectedExpression, "expected an operand");
        }
        self.finish_node();
        true
    }

    fn parse_primary_expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        match self.current() {
            SyntaxKind::KwTypeof => self.parse_typeof_expr(),
            SyntaxKind::KwDefault if self.next_is(SyntaxKind::ParenOpen) => return false,
            kind if LITERALS.contains(kind) => {
                self.start_node(SyntaxKind::LiteralExpr);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Id if self.at_contextual("nameof") && self.next_is(SyntaxKind::ParenOpen) => {
                self.parse_nameof_expr()
            }
            SyntaxKind::Id | SyntaxKind::KwPredefined => {
                self.start_node(SyntaxKind::NameExpr);
                if self.currently_is(SyntaxKind::Id) && self.next_is(SyntaxKind::DoubleColon) {
                    self.bump();
                    self.bump();
                }
                self.bump();
                self.finish_node();
            }
            SyntaxKind::ParenOpen => self.parse_paren_expr(),
            _ => return false,
        }

        while self.currently_is(SyntaxKind::Dot) && self.peek_nth(1) == SyntaxKind::Id {
            self.start_node_at(checkpoint, SyntaxKind::MemberAccessExpr);
            self.bump();
            self.bump();
            self.finish_node();
        }
        true
    }

    /// `typeof(Type)`, including unbound generics `typeof(List<>)`.
    fn parse_typeof_expr(&mut self) {
        self.start_node(SyntaxKind::TypeofExpr);
        self.bump(); // typeof
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.push_delimiter(SyntaxKind::ParenOpen);
            self.bump();
            self.parse_type();
            self.close_delimiter();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(` after `typeof`");
        }
        self.finish_node();
    }

    /// `nameof(A.B)`
    fn parse_nameof_expr(&mut self) {
        self.start_node(SyntaxKind::NameofExpr);
        self.bump(); // nameof
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();
        self.parse_expr();
        self.close_delimiter();
        self.finish_node();
    }

    fn parse_paren_expr(&mut self) {
        self.start_node(SyntaxKind::ParenExpr);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();
        self.parse_expr();
        self.close_delimiter();
        self.finish_node();
    }
}
