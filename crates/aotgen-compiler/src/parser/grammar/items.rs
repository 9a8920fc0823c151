use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::TokenSet;
use crate::parser::cst::token_sets::{MODIFIERS, ROOT_RECOVERY, TYPE_KEYWORDS};

const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "async", "required", "file"];

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);
        self.parse_namespace_body(false);
        self.eat_trivia();
        self.finish_node();
    }

    /// Items of a compilation unit or namespace. A braced body stops at `}`.
    fn parse_namespace_body(&mut self, braced: bool) {
        while !self.at_end() {
            if braced && self.currently_is(SyntaxKind::BraceClose) {
                break;
            }
            let start = self.pos;
            self.parse_namespace_item();
            if self.pos == start && !self.at_end() {
                self.error_and_bump(DiagnosticKind::ExpectedDeclaration);
            }
        }
    }

    fn parse_namespace_item(&mut self) {
        match self.current() {
            SyntaxKind::KwUsing => self.parse_using_directive(),
            SyntaxKind::Id if self.at_contextual("global") && self.next_is(SyntaxKind::KwUsing) => {
                self.parse_using_directive()
            }
            SyntaxKind::KwNamespace => self.parse_namespace(),
            SyntaxKind::BracketOpen if self.at_global_attribute() => self.parse_attribute_list(),
            _ => self.parse_type_or_delegate(),
        }
    }

    /// `[global] using [static] [Alias =] Name;`
    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::UsingDirective);
        if self.currently_is(SyntaxKind::Id) {
            self.bump(); // global
        }
        self.bump(); // using
        self.eat_token(SyntaxKind::KwStatic);
        if self.currently_is(SyntaxKind::Id) && self.next_is(SyntaxKind::Equals) {
            self.bump();
            self.bump();
        }
        self.parse_type();
        self.expect(SyntaxKind::Semicolon, "`;` after using directive");
        self.finish_node();
    }

    /// `namespace A.B { ... }` or file-scoped `namespace A.B;` (owns the rest of the file).
    fn parse_namespace(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        self.start_node(SyntaxKind::NamespaceDecl);
        self.bump(); // namespace
        self.parse_type_name();

        if self.eat_token(SyntaxKind::Semicolon) {
            self.parse_namespace_body(false);
        } else if self.currently_is(SyntaxKind::BraceOpen) {
            self.push_delimiter(SyntaxKind::BraceOpen);
            self.bump();
            self.parse_namespace_body(true);
            self.close_delimiter();
            self.eat_token(SyntaxKind::Semicolon);
        } else {
            self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "expected `{` or `;` after namespace name",
            );
        }

        self.finish_node();
        self.exit_recursion();
    }

    fn at_global_attribute(&mut self) -> bool {
        self.peek_nth(2) == SyntaxKind::Colon
            && matches!(self.peek_nth_text(1), "assembly" | "module")
    }

    fn parse_type_or_delegate(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_attribute_lists();
        self.parse_modifiers();

        if self.at_type_keyword() {
            self.parse_type_decl(checkpoint);
            return;
        }
        if self.currently_is(SyntaxKind::KwDelegate) {
            self.parse_delegate(checkpoint);
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::Error);
        self.error_msg(
            DiagnosticKind::ExpectedDeclaration,
            "expected a type declaration",
        );
        let recovery = ROOT_RECOVERY
            .union(MODIFIERS)
            .union(TokenSet::single(SyntaxKind::BraceClose));
        while !self.at_end() && !self.currently_is_one_of(recovery) {
            self.bump_balanced();
        }
        self.finish_node();
    }

    /// Access and declaration modifiers, including contextual ones (`partial`, `required`, ...).
    pub(super) fn parse_modifiers(&mut self) {
        self.start_node(SyntaxKind::ModifierList);
        loop {
            if self.currently_is_one_of(MODIFIERS) || self.at_contextual_modifier() {
                self.bump();
                continue;
            }
            break;
        }
        self.finish_node();
    }

    fn at_contextual_modifier(&mut self) -> bool {
        if !self.currently_is(SyntaxKind::Id) || !CONTEXTUAL_MODIFIERS.contains(&self.current_text())
        {
            return false;
        }
        let next = self.peek_nth(1);
        MODIFIERS.contains(next)
            || TYPE_KEYWORDS.contains(next)
            || matches!(
                next,
                SyntaxKind::Id
                    | SyntaxKind::KwPredefined
                    | SyntaxKind::KwVoid
                    | SyntaxKind::KwDelegate
                    | SyntaxKind::KwEvent
                    | SyntaxKind::ParenOpen
            )
    }

    pub(super) fn at_type_keyword(&mut self) -> bool {
        if self.currently_is_one_of(TYPE_KEYWORDS) {
            return true;
        }
        self.at_contextual("record")
            && matches!(
                self.peek_nth(1),
                SyntaxKind::Id | SyntaxKind::KwClass | SyntaxKind::KwStruct
            )
    }

    /// Type declaration after its attributes and modifiers:
    /// `class|struct|interface|enum|record [class|struct] Name<T>(params) : Bases where ... { }`
    pub(super) fn parse_type_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::TypeDecl);

        let is_enum = self.currently_is(SyntaxKind::KwEnum);
        if self.at_contextual("record") {
            self.bump();
            if self.currently_is(SyntaxKind::KwClass) || self.currently_is(SyntaxKind::KwStruct) {
                self.bump();
            }
        } else {
            self.bump();
        }

        self.expect(SyntaxKind::Id, "type name");
        if self.currently_is(SyntaxKind::Lt) {
            self.parse_type_param_list();
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_param_list();
        }
        if self.currently_is(SyntaxKind::Colon) {
            self.parse_base_list();
        }
        while self.at_contextual("where") {
            self.parse_constraint_clause();
        }

        if self.currently_is(SyntaxKind::BraceOpen) {
            if is_enum {
                self.parse_enum_body();
            } else {
                self.parse_member_list();
            }
            self.eat_token(SyntaxKind::Semicolon);
        } else if !self.eat_token(SyntaxKind::Semicolon) {
            self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "expected `{` or `;` after type declaration",
            );
        }

        self.finish_node();
    }

    /// `delegate ReturnType Name<T>(params);`
    pub(super) fn parse_delegate(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::DelegateDecl);
        self.bump(); // delegate
        self.parse_type();
        self.expect(SyntaxKind::Id, "delegate name");
        if self.currently_is(SyntaxKind::Lt) {
            self.parse_type_param_list();
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_param_list();
        }
        while self.at_contextual("where") {
            self.parse_constraint_clause();
        }
        self.expect(SyntaxKind::Semicolon, "`;` after delegate declaration");
        self.finish_node();
    }

    /// `: Base(args), IFoo, IBar<T>`
    fn parse_base_list(&mut self) {
        self.start_node(SyntaxKind::BaseList);
        self.bump(); // :
        loop {
            self.parse_type();
            if self.currently_is(SyntaxKind::ParenOpen) {
                self.start_node(SyntaxKind::BaseArgs);
                self.bump_balanced();
                self.finish_node();
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    /// `where T : class, new()` - kept as an opaque token run.
    pub(super) fn parse_constraint_clause(&mut self) {
        self.start_node(SyntaxKind::ConstraintClause);
        self.bump(); // where
        while !self.at_end()
            && !self.at_contextual("where")
            && !self.currently_is_one_of(TokenSet::new(&[
                SyntaxKind::BraceOpen,
                SyntaxKind::Semicolon,
                SyntaxKind::Arrow,
            ]))
        {
            self.bump_balanced();
        }
        self.finish_node();
    }

    /// `<[Attr] in T, out U>`
    pub(super) fn parse_type_param_list(&mut self) {
        self.start_node(SyntaxKind::TypeParamList);
        self.push_delimiter(SyntaxKind::Lt);
        self.bump();
        loop {
            self.start_node(SyntaxKind::TypeParam);
            self.parse_attribute_lists();
            if self.currently_is(SyntaxKind::KwIn) || self.currently_is(SyntaxKind::KwOut) {
                self.bump();
            }
            self.expect(SyntaxKind::Id, "type parameter name");
            self.finish_node();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter();
        self.finish_node();
    }

    /// Consume everything left into a single `Error` node (recursion limit reached).
    pub(super) fn bail_out(&mut self) {
        self.start_node(SyntaxKind::Error);
        while !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }
}
