use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::TYPE_FIRST;

impl Parser<'_> {
    /// Type reference with `?` and array rank suffixes.
    pub(crate) fn parse_type(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        let checkpoint = self.checkpoint();
        match self.current() {
            SyntaxKind::KwPredefined | SyntaxKind::KwVoid => {
                self.start_node(SyntaxKind::PredefinedType);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::ParenOpen => self.parse_tuple_type(),
            SyntaxKind::Id => self.parse_type_name_at(checkpoint),
            _ => {
                self.error_msg(DiagnosticKind::ExpectedType, "expected a type");
                self.exit_recursion();
                return;
            }
        }

        loop {
            match self.current() {
                SyntaxKind::Question => {
                    self.start_node_at(checkpoint, SyntaxKind::NullableType);
                    self.bump();
                    self.finish_node();
                }
                SyntaxKind::BracketOpen if self.at_rank_specifier() => {
                    self.start_node_at(checkpoint, SyntaxKind::ArrayType);
                    while self.currently_is(SyntaxKind::BracketOpen) && self.at_rank_specifier() {
                        self.parse_rank_specifier();
                    }
                    self.finish_node();
                }
                _ => break,
            }
        }

        self.exit_recursion();
    }

    fn at_rank_specifier(&mut self) -> bool {
        matches!(
            self.peek_nth(1),
            SyntaxKind::BracketClose | SyntaxKind::Comma
        )
    }

    /// `[]`, `[,]`, `[,,]`
    fn parse_rank_specifier(&mut self) {
        self.start_node(SyntaxKind::RankSpecifier);
        self.bump(); // [
        while self.eat_token(SyntaxKind::Comma) {}
        self.expect(SyntaxKind::BracketClose, "`]` to close array rank");
        self.finish_node();
    }

    /// Possibly qualified name: `A.B<T>.C`, `global::A.B`.
    pub(crate) fn parse_type_name(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_type_name_at(checkpoint);
    }

    fn parse_type_name_at(&mut self, checkpoint: Checkpoint) {
        if self.currently_is(SyntaxKind::Id) && self.next_is(SyntaxKind::DoubleColon) {
            self.start_node_at(checkpoint, SyntaxKind::AliasQualifiedName);
            self.bump();
            self.bump();
            self.parse_simple_name();
            self.finish_node();
        } else {
            self.parse_simple_name();
        }

        while self.currently_is(SyntaxKind::Dot) && self.peek_nth(1) == SyntaxKind::Id {
            self.start_node_at(checkpoint, SyntaxKind::QualifiedName);
            self.bump();
            self.parse_simple_name();
            self.finish_node();
        }
    }

    /// `Name` or `Name<T1, T2>`; empty slots (`Name<,>`) denote an unbound generic.
    fn parse_simple_name(&mut self) {
        self.start_node(SyntaxKind::SimpleName);
        self.expect(SyntaxKind::Id, "type name");
        if self.currently_is(SyntaxKind::Lt) {
            self.parse_type_arg_list();
        }
        self.finish_node();
    }

    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TypeArgList);
        self.push_delimiter(SyntaxKind::Lt);
        self.bump();
        while !self.at_end() && !self.currently_is(SyntaxKind::Gt) {
            if self.eat_token(SyntaxKind::Comma) {
                continue;
            }
            if !self.currently_is_one_of(TYPE_FIRST) {
                break;
            }
            self.parse_type();
        }
        self.close_delimiter();
        self.finish_node();
    }

    /// `(int Count, string)`
    fn parse_tuple_type(&mut self) {
        self.start_node(SyntaxKind::TupleType);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();
        loop {
            self.parse_type();
            self.eat_token(SyntaxKind::Id);
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter();
        self.finish_node();
    }
}
