use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::{SyntaxKind, TokenSet};

impl Parser<'_> {
    pub(crate) fn parse_attribute_lists(&mut self) {
        while self.currently_is(SyntaxKind::BracketOpen) {
            self.parse_attribute_list();
        }
    }

    /// `[target: A, B(1, Name = 2)]`
    pub(crate) fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::AttributeList);
        self.push_delimiter(SyntaxKind::BracketOpen);
        self.bump();

        if (self.currently_is(SyntaxKind::Id) || self.currently_is(SyntaxKind::KwEvent))
            && self.next_is(SyntaxKind::Colon)
        {
            self.start_node(SyntaxKind::AttributeTarget);
            self.bump();
            self.bump();
            self.finish_node();
        }

        while !self.at_end() && !self.currently_is(SyntaxKind::BracketClose) {
            self.parse_attribute();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        if !self.at_end() && !self.currently_is(SyntaxKind::BracketClose) {
            self.error_recover(
                DiagnosticKind::UnexpectedToken,
                "expected `,` or `]`",
                TokenSet::new(&[
                    SyntaxKind::BracketClose,
                    SyntaxKind::BraceOpen,
                    SyntaxKind::BraceClose,
                    SyntaxKind::Semicolon,
                ]),
            );
        }

        self.close_delimiter();
        self.finish_node();
    }

    fn parse_attribute(&mut self) {
        self.start_node(SyntaxKind::Attribute);
        if self.currently_is(SyntaxKind::Id) {
            self.parse_type_name();
        } else {
            self.error_msg(DiagnosticKind::ExpectedIdentifier, "expected attribute name");
        }
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_attribute_arg_list();
        }
        self.finish_node();
    }

    fn parse_attribute_arg_list(&mut self) {
        self.start_node(SyntaxKind::AttributeArgList);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        while !self.at_end() && !self.currently_is(SyntaxKind::ParenClose) {
            self.parse_attribute_arg();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.close_delimiter();
        self.finish_node();
    }

    /// `expr`, `Name = expr` or `name: expr`
    fn parse_attribute_arg(&mut self) {
        self.start_node(SyntaxKind::AttributeArg);
        if self.currently_is(SyntaxKind::Id)
            && (self.next_is(SyntaxKind::Equals) || self.next_is(SyntaxKind::Colon))
        {
            self.bump();
            self.bump();
        }
        self.parse_expr();
        self.finish_node();
    }
}
