use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::token_sets::{MEMBER_RECOVERY, PARAM_MODIFIERS, TYPE_FIRST};
use crate::parser::cst::{SyntaxKind, TokenSet};

const ACCESSOR_KEYWORDS: &[&str] = &["get", "set", "init", "add", "remove"];

impl Parser<'_> {
    /// `{ member* }` of a class, struct, interface or record.
    pub(super) fn parse_member_list(&mut self) {
        self.start_node(SyntaxKind::MemberList);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump();

        while !self.at_end() && !self.currently_is(SyntaxKind::BraceClose) {
            let start = self.pos;
            self.parse_member();
            if self.pos == start && !self.at_end() {
                self.error_and_bump(DiagnosticKind::ExpectedDeclaration);
            }
        }

        self.close_delimiter();
        self.finish_node();
    }

    /// `{ A, B = 2, [Attr] C }`
    pub(super) fn parse_enum_body(&mut self) {
        self.start_node(SyntaxKind::MemberList);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump();

        while !self.at_end() && !self.currently_is(SyntaxKind::BraceClose) {
            let start = self.pos;
            let checkpoint = self.checkpoint();
            self.parse_attribute_lists();
            if self.currently_is(SyntaxKind::Id) {
                self.start_node_at(checkpoint, SyntaxKind::EnumMemberDecl);
                self.bump();
                if self.currently_is(SyntaxKind::Equals) {
                    self.parse_initializer();
                }
                self.finish_node();
            } else {
                self.error_msg(
                    DiagnosticKind::ExpectedIdentifier,
                    "expected enum member name",
                );
            }

            if !self.eat_token(SyntaxKind::Comma) && !self.currently_is(SyntaxKind::BraceClose) {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `,` or `}`");
            }
            if self.pos == start && !self.at_end() {
                self.error_and_bump(DiagnosticKind::UnexpectedToken);
            }
        }

        self.close_delimiter();
        self.finish_node();
    }

    fn parse_member(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_attribute_lists();
        self.parse_modifiers();

        match self.current() {
            _ if self.at_type_keyword() => self.parse_type_decl(checkpoint),
            SyntaxKind::KwDelegate => self.parse_delegate(checkpoint),
            SyntaxKind::KwEvent | SyntaxKind::KwConversion | SyntaxKind::Operator => {
                self.parse_opaque_member(checkpoint)
            }
            SyntaxKind::Id if self.next_is(SyntaxKind::ParenOpen) => self.parse_ctor(checkpoint),
            kind if TYPE_FIRST.contains(kind) => self.parse_typed_member(checkpoint),
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::Error);
                self.error_msg(
                    DiagnosticKind::ExpectedDeclaration,
                    "expected a member declaration",
                );
                while !self.at_end() && !self.currently_is_one_of(MEMBER_RECOVERY) {
                    self.bump_balanced();
                }
                self.eat_token(SyntaxKind::Semicolon);
                self.finish_node();
            }
        }

        self.exit_recursion();
    }

    /// Members that start with a type: methods, properties, fields, indexers, operators.
    fn parse_typed_member(&mut self, checkpoint: Checkpoint) {
        self.parse_type();

        match self.current() {
            SyntaxKind::KwOperator | SyntaxKind::KwThis => self.parse_opaque_member(checkpoint),
            // Explicit interface implementation: `int IFoo.Bar()`
            SyntaxKind::Id if self.next_is(SyntaxKind::Dot) => self.parse_opaque_member(checkpoint),
            SyntaxKind::Id => match self.peek_nth(1) {
                SyntaxKind::ParenOpen | SyntaxKind::Lt => self.parse_method(checkpoint),
                SyntaxKind::BraceOpen | SyntaxKind::Arrow => self.parse_property(checkpoint),
                _ => self.parse_field(checkpoint),
            },
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::Error);
                self.error_msg(DiagnosticKind::ExpectedIdentifier, "expected member name");
                while !self.at_end() && !self.currently_is_one_of(MEMBER_RECOVERY) {
                    self.bump_balanced();
                }
                self.eat_token(SyntaxKind::Semicolon);
                self.finish_node();
            }
        }
    }

    /// `Name(params) : base(args) { }`
    fn parse_ctor(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::CtorDecl);
        self.bump(); // name
        self.parse_param_list();
        if self.eat_token(SyntaxKind::Colon) {
            // `base(...)` or `this(...)`
            if self.currently_is(SyntaxKind::Id) || self.currently_is(SyntaxKind::KwThis) {
                self.bump();
            }
            if self.currently_is(SyntaxKind::ParenOpen) {
                self.bump_balanced();
            }
        }
        self.parse_member_body();
        self.finish_node();
    }

    /// `Type Name<T>(params) where ... body`
    fn parse_method(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
        self.bump(); // name
        if self.currently_is(SyntaxKind::Lt) {
            self.parse_type_param_list();
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_param_list();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(` after method name");
        }
        while self.at_contextual("where") {
            self.parse_constraint_clause();
        }
        self.parse_member_body();
        self.finish_node();
    }

    /// `Type Name { get; set; } = init;` or `Type Name => expr;`
    fn parse_property(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::PropertyDecl);
        self.bump(); // name
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_accessor_list();
            if self.currently_is(SyntaxKind::Equals) {
                self.parse_initializer();
                self.expect(SyntaxKind::Semicolon, "`;` after property initializer");
            }
        } else {
            self.parse_expr_body();
            self.expect(SyntaxKind::Semicolon, "`;` after expression body");
        }
        self.finish_node();
    }

    /// `Type a = 1, b;`
    fn parse_field(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::FieldDecl);
        loop {
            self.start_node(SyntaxKind::VariableDeclarator);
            self.expect(SyntaxKind::Id, "field name");
            if self.currently_is(SyntaxKind::BracketOpen) {
                self.bump_balanced(); // fixed-size buffer
            }
            if self.currently_is(SyntaxKind::Equals) {
                self.parse_initializer();
            }
            self.finish_node();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Semicolon, "`;` after field declaration");
        self.finish_node();
    }

    /// Events, operators, indexers, destructors and explicit implementations:
    /// kept as tokens up to `;` or the end of the body.
    fn parse_opaque_member(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::OpaqueMember);
        let mut in_expression = false;
        while !self.at_end() {
            match self.current() {
                SyntaxKind::Semicolon => {
                    self.bump();
                    break;
                }
                SyntaxKind::BraceClose => break,
                SyntaxKind::BraceOpen => {
                    self.bump_balanced();
                    if !in_expression {
                        break;
                    }
                }
                SyntaxKind::Arrow | SyntaxKind::Equals => {
                    in_expression = true;
                    self.bump();
                }
                _ => self.bump_balanced(),
            }
        }
        self.finish_node();
    }

    /// `{ get; private set; init => ...; }`
    fn parse_accessor_list(&mut self) {
        self.start_node(SyntaxKind::AccessorList);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump();

        while !self.at_end() && !self.currently_is(SyntaxKind::BraceClose) {
            let start = self.pos;
            let checkpoint = self.checkpoint();
            self.parse_attribute_lists();
            self.parse_modifiers();
            if self.currently_is(SyntaxKind::Id) && ACCESSOR_KEYWORDS.contains(&self.current_text()) {
                self.start_node_at(checkpoint, SyntaxKind::Accessor);
                self.bump();
                self.parse_member_body();
                self.finish_node();
            } else {
                self.start_node_at(checkpoint, SyntaxKind::Error);
                self.error_msg(
                    DiagnosticKind::UnexpectedToken,
                    "expected `get`, `set` or `init`",
                );
                if !self.at_end() && !self.currently_is(SyntaxKind::BraceClose) {
                    self.bump_balanced();
                }
                self.finish_node();
            }
            if self.pos == start && !self.at_end() {
                self.error_and_bump(DiagnosticKind::UnexpectedToken);
            }
        }

        self.close_delimiter();
        self.finish_node();
    }

    /// Block, `=> expr;`, or bare `;`.
    fn parse_member_body(&mut self) {
        match self.current() {
            SyntaxKind::BraceOpen => self.parse_block(),
            SyntaxKind::Arrow => {
                self.parse_expr_body();
                self.expect(SyntaxKind::Semicolon, "`;` after expression body");
            }
            _ => {
                self.expect(SyntaxKind::Semicolon, "`;` or a body");
            }
        }
    }

    /// `{ ... }` with balanced contents kept as tokens.
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump();
        while !self.at_end() && !self.currently_is(SyntaxKind::BraceClose) {
            self.bump_balanced();
        }
        self.close_delimiter();
        self.finish_node();
    }

    /// `=> tokens` up to the terminating `;`.
    fn parse_expr_body(&mut self) {
        self.start_node(SyntaxKind::ExprBody);
        self.bump(); // =>
        while !self.at_end()
            && !self.currently_is_one_of(TokenSet::new(&[
                SyntaxKind::Semicolon,
                SyntaxKind::BraceClose,
            ]))
        {
            self.bump_balanced();
        }
        self.finish_node();
    }

    /// `= expr`
    pub(super) fn parse_initializer(&mut self) {
        self.start_node(SyntaxKind::Initializer);
        self.bump(); // =
        self.parse_expr();
        self.finish_node();
    }

    /// `(params)`
    pub(super) fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        while !self.at_end() && !self.currently_is(SyntaxKind::ParenClose) {
            self.parse_param();
            if self.eat_token(SyntaxKind::Comma) {
                continue;
            }
            if self.currently_is(SyntaxKind::ParenClose) {
                break;
            }
            self.error_recover(
                DiagnosticKind::UnexpectedToken,
                "expected `,` or `)`",
                TokenSet::new(&[
                    SyntaxKind::Comma,
                    SyntaxKind::ParenClose,
                    SyntaxKind::BraceOpen,
                    SyntaxKind::Semicolon,
                ]),
            );
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.close_delimiter();
        self.finish_node();
    }

    /// `[Attr] ref Type name = default`
    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::Param);
        self.parse_attribute_lists();
        while self.currently_is_one_of(PARAM_MODIFIERS) || self.at_contextual("scoped") {
            self.bump();
        }
        if self.currently_is_one_of(TYPE_FIRST) {
            self.parse_type();
        } else {
            self.error_msg(DiagnosticKind::ExpectedType, "expected parameter type");
        }
        self.expect(SyntaxKind::Id, "parameter name");
        if self.currently_is(SyntaxKind::Equals) {
            self.parse_initializer();
        }
        self.finish_node();
    }
}
