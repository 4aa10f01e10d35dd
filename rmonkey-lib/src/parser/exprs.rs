//! This module lets the [`Parser`] parse expressions.

use super::{Parser, Precedence};
use crate::{
    ast::{Expression, Identifier, InfixOperator, PrefixOperator},
    tokens::TokenType,
};

/// Check if the given token type has an infix parser.
fn has_infix_parser(token_type: TokenType) -> bool {
    use TokenType::*;

    matches!(
        token_type,
        Plus | Minus | Asterisk | Slash | Lt | Gt | Eq | NotEq | LParen
    )
}

impl Parser<'_> {
    /// Parse an expression with the Pratt precedence-climbing loop.
    ///
    /// The current token is parsed in prefix position; then, while the next
    /// token binds tighter than the caller's precedence and has an infix
    /// parser, the expression so far becomes the left arm of that infix
    /// parser's result.
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_token_is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            if !has_infix_parser(self.peek_token.token_type) {
                return Some(left);
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    /// Parse the current token in prefix position.
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur_token.token_type {
            TokenType::Identifier => Some(Expression::Identifier(Identifier::new(
                self.cur_token.literal.clone(),
            ))),
            TokenType::Int => self.parse_integer_literal(),
            TokenType::String => Some(Expression::StringLiteral(self.cur_token.literal.clone())),
            TokenType::True => Some(Expression::Boolean(true)),
            TokenType::False => Some(Expression::Boolean(false)),
            TokenType::Bang => self.parse_prefix_expression(PrefixOperator::Bang),
            TokenType::Minus => self.parse_prefix_expression(PrefixOperator::Minus),
            TokenType::LParen => self.parse_grouped_expression(),
            TokenType::If => self.parse_if_expression(),
            TokenType::Function => self.parse_function_literal(),
            _ => {
                self.errors.push(format!(
                    "no prefix parse function for {}",
                    self.cur_token.literal
                ));
                None
            }
        }
    }

    /// Parse the current token in infix position, with `left` as the
    /// already-parsed left arm.
    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.cur_token.token_type {
            TokenType::LParen => self.parse_call_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    /// Parse an integer literal, reporting 64-bit overflow.
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(value)),
            Err(_) => {
                self.errors
                    .push(format!("cannot parse {} as int64", self.cur_token.literal));
                None
            }
        }
    }

    /// Parse a prefix operator expression: the operand binds at
    /// [`Precedence::Prefix`].
    fn parse_prefix_expression(&mut self, operator: PrefixOperator) -> Option<Expression> {
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(operator, Box::new(right)))
    }

    /// Parse a parenthesized expression. No AST node is produced for the
    /// parens themselves; the renderer re-parenthesizes everything anyway.
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(expr)
    }

    /// if → "if" "(" expression ")" block ( "else" block )? ;
    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }
        let consequence = self.parse_block();

        let alternative = if self.peek_token_is(TokenType::Else) {
            self.next_token();
            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }
            Some(self.parse_block())
        } else {
            None
        };

        Some(Expression::If(
            Box::new(condition),
            consequence,
            alternative,
        ))
    }

    /// func → "func" "(" parameters? ")" block ;
    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }
        let body = self.parse_block();

        Some(Expression::FunctionLiteral(parameters, body))
    }

    /// parameters → IDENTIFIER ( "," IDENTIFIER )* ;
    ///
    /// The list may be empty. Expects the current token to be the opening
    /// paren and consumes through the closing paren.
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_token_is(TokenType::RParen) {
            self.next_token();
            return Some(parameters);
        }

        if !self.expect_peek(TokenType::Identifier) {
            return None;
        }
        parameters.push(Identifier::new(self.cur_token.literal.clone()));

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Identifier) {
                return None;
            }
            parameters.push(Identifier::new(self.cur_token.literal.clone()));
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(parameters)
    }

    /// Parse a standard left-associative binary expression.
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        use TokenType::*;

        let operator = match self.cur_token.token_type {
            Plus => InfixOperator::Plus,
            Minus => InfixOperator::Minus,
            Asterisk => InfixOperator::Asterisk,
            Slash => InfixOperator::Slash,
            Lt => InfixOperator::Lt,
            Gt => InfixOperator::Gt,
            Eq => InfixOperator::Eq,
            NotEq => InfixOperator::NotEq,
            other => unreachable!(
                "parse_infix is only called for tokens with an infix parser, got {other}"
            ),
        };

        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(
            Box::new(left),
            operator,
            Box::new(right),
        ))
    }

    /// Finish parsing a call expression: the opening paren is the current
    /// token and `callee` is the already-parsed expression before it.
    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call(Box::new(callee), arguments))
    }

    /// arguments → expression ( "," expression )* ;
    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.peek_token_is(TokenType::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(arguments)
    }
}
