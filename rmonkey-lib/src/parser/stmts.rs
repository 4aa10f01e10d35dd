//! This module lets the [`Parser`] parse statements.

use super::{Parser, Precedence};
use crate::{
    ast::{Block, Identifier, Statement},
    tokens::TokenType,
};

impl Parser<'_> {
    /// statement → letStmt | returnStmt | exprStmt ;
    ///
    /// A statement that fails to parse records its errors and yields `None`;
    /// the caller advances past it and keeps going.
    pub(super) fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// letStmt → "let" IDENTIFIER "=" expression ";"? ;
    fn parse_let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenType::Identifier) {
            return None;
        }
        let name = Identifier::new(self.cur_token.literal.clone());

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }
        self.next_token();

        // Consume the trailing semicolon even if the value failed to parse,
        // so a bad statement doesn't cascade into a bogus error on its `;`.
        let value = self.parse_expression(Precedence::Lowest);
        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(Statement::Let(name, value?))
    }

    /// returnStmt → "return" expression? ";"? ;
    ///
    /// A bare `return;` carries no expression and returns null.
    fn parse_return_statement(&mut self) -> Option<Statement> {
        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
            return Some(Statement::Return(None));
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest);
        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(Statement::Return(Some(value?)))
    }

    /// exprStmt → expression ";"? ;
    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest);

        if self.peek_token_is(TokenType::Semicolon) {
            self.next_token();
        }

        expr.map(Statement::Expression)
    }

    /// block → "{" statement* "}" ;
    ///
    /// Expects the current token to be the opening brace and leaves the
    /// closing brace (or end of input) as the current token.
    pub(super) fn parse_block(&mut self) -> Block {
        let mut block = Block::default();
        self.next_token();

        while !self.cur_token_is(TokenType::RBrace) && !self.cur_token_is(TokenType::Eof) {
            if let Some(statement) = self.parse_statement() {
                block.statements.push(statement);
            }
            self.next_token();
        }

        block
    }
}
