//! This module provides the [`Parser`].

mod exprs;
mod stmts;

use crate::{
    ast::Program,
    lexer::Lexer,
    tokens::{Token, TokenType},
};
use std::mem;

/// The precedence of an operator, from loosest to tightest binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// The starting precedence of every expression.
    Lowest,

    /// `==` and `!=`.
    Equals,

    /// `<` and `>`.
    LessGreater,

    /// `+` and binary `-`.
    Sum,

    /// `*` and `/`.
    Product,

    /// `!x` and unary `-x`.
    Prefix,

    /// `f(x)`.
    Call,
}

impl Precedence {
    /// The precedence that the given token has in infix position.
    fn of(token_type: TokenType) -> Self {
        use TokenType::*;

        match token_type {
            Eq | NotEq => Self::Equals,
            Lt | Gt => Self::LessGreater,
            Plus | Minus => Self::Sum,
            Slash | Asterisk => Self::Product,
            LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

/// A Pratt parser for Monkey.
///
/// It parses this grammar:
/// ```text
/// program     → statement* EOF ;
///
/// statement   → letStmt | returnStmt | exprStmt ;
/// letStmt     → "let" IDENTIFIER "=" expression ";"? ;
/// returnStmt  → "return" expression? ";"? ;
/// exprStmt    → expression ";"? ;
/// block       → "{" statement* "}" ;
///
/// expression  → prefix infix* ;
/// prefix      → IDENTIFIER | INT | STRING | "true" | "false"
///             | ( "!" | "-" ) expression
///             | "(" expression ")"
///             | "if" "(" expression ")" block ( "else" block )?
///             | "func" "(" parameters? ")" block ;
/// infix       → ( "+" | "-" | "*" | "/" | "<" | ">" | "==" | "!=" ) expression
///             | "(" arguments? ")" ;
/// parameters  → IDENTIFIER ( "," IDENTIFIER )* ;
/// arguments   → expression ( "," expression )* ;
/// ```
///
/// with a per-token-type prefix/infix dispatch and an explicit
/// [`Precedence`] ladder instead of one grammar rule per precedence level.
///
/// The parser never fails as a whole: an unparsable construct records a
/// message in the errors list and is skipped, and parsing continues.
pub struct Parser<'s> {
    /// The lexer supplying the token stream.
    lexer: Lexer<'s>,

    /// The token currently being considered.
    cur_token: Token,

    /// The token after the current one.
    peek_token: Token,

    /// All errors encountered so far.
    errors: Vec<String>,
}

impl<'s> Parser<'s> {
    /// Create a new parser reading from the given lexer.
    pub fn new(lexer: Lexer<'s>) -> Self {
        let mut parser = Self {
            lexer,
            cur_token: Token::new(TokenType::Eof, ""),
            peek_token: Token::new(TokenType::Eof, ""),
            errors: Vec::new(),
        };

        // Prime the two-token window.
        parser.next_token();
        parser.next_token();

        parser
    }

    /// Parse the given source code, returning the accumulated errors if
    /// there were any.
    pub fn parse(source: &'s str) -> Result<Program, Vec<String>> {
        let mut parser = Self::new(Lexer::new(source));
        let program = parser.parse_program();

        if parser.errors.is_empty() {
            Ok(program)
        } else {
            Err(parser.errors)
        }
    }

    /// program → statement* EOF ;
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_token_is(TokenType::Eof) {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }

        program
    }

    /// Get the errors encountered so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Advance the two-token window.
    fn next_token(&mut self) {
        self.cur_token = mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    /// Check if the current token is of the given type.
    #[inline]
    fn cur_token_is(&self, token_type: TokenType) -> bool {
        self.cur_token.token_type == token_type
    }

    /// Check if the next token is of the given type.
    #[inline]
    fn peek_token_is(&self, token_type: TokenType) -> bool {
        self.peek_token.token_type == token_type
    }

    /// Advance if the next token is of the given type; otherwise record an
    /// error and stay put.
    fn expect_peek(&mut self, token_type: TokenType) -> bool {
        if self.peek_token_is(token_type) {
            self.next_token();
            true
        } else {
            self.peek_error(token_type);
            false
        }
    }

    /// Record an unmet expectation about the next token.
    fn peek_error(&mut self, expected: TokenType) {
        self.errors.push(format!(
            "expected next token to be {expected}, got {} instead",
            self.peek_token.token_type
        ));
    }

    /// The infix precedence of the current token.
    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur_token.token_type)
    }

    /// The infix precedence of the next token.
    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek_token.token_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Identifier, InfixOperator, Statement};

    /// Parse a program that must be error-free.
    fn parse(code: &str) -> Program {
        Parser::parse(code)
            .unwrap_or_else(|errors| panic!("unexpected parse errors for {code:?}: {errors:#?}"))
    }

    /// Parse a single expression statement and return its expression.
    fn parse_expr(code: &str) -> Expression {
        let program = parse(code);
        let [Statement::Expression(expr)] = &program.statements[..] else {
            panic!("expected a single expression statement, got {program:#?}");
        };
        expr.clone()
    }

    #[test]
    fn let_statements() {
        let program = parse("let x = 5;\nlet y = true;\nlet foobar = y;");

        assert_eq!(
            program.statements,
            vec![
                Statement::Let(Identifier::new("x"), Expression::IntegerLiteral(5)),
                Statement::Let(Identifier::new("y"), Expression::Boolean(true)),
                Statement::Let(
                    Identifier::new("foobar"),
                    Expression::Identifier(Identifier::new("y"))
                ),
            ]
        );
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn return_statements() {
        let program = parse("return 5;\nreturn x;\nreturn;");

        assert_eq!(
            program.statements,
            vec![
                Statement::Return(Some(Expression::IntegerLiteral(5))),
                Statement::Return(Some(Expression::Identifier(Identifier::new("x")))),
                Statement::Return(None),
            ]
        );
    }

    #[test]
    fn semicolons_are_optional() {
        assert_eq!(parse("5 + 5").statements, parse("5 + 5;").statements);
        assert_eq!(
            parse("let x = 1").statements,
            parse("let x = 1;").statements
        );
        assert_eq!(parse("return 1").statements, parse("return 1;").statements);
    }

    #[test]
    fn operator_precedence() {
        for (code, rendered) in [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("false", "false"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
        ] {
            assert_eq!(parse_expr(code).to_string(), rendered, "code: {code:?}");
        }
    }

    #[test]
    fn reprint_round_trip() {
        for code in [
            "let x = 5 + 10 * 2;",
            "if (x < y) { x } else { y }",
            "let adder = func(a, b) { return a + b; };",
            "add(1, 2 * 3, -4);",
            "!true == false;",
            "return;",
        ] {
            let first = parse(code).to_string();
            let second = parse(&first).to_string();
            assert_eq!(first, second, "code: {code:?}");
        }
    }

    #[test]
    fn if_expression() {
        let expr = parse_expr("if (x < y) { x }");

        let Expression::If(condition, consequence, alternative) = expr else {
            panic!("expected an if expression, got {expr:?}");
        };
        assert_eq!(condition.to_string(), "(x < y)");
        assert_eq!(
            consequence.statements,
            vec![Statement::Expression(Expression::Identifier(
                Identifier::new("x")
            ))]
        );
        assert_eq!(alternative, None);
    }

    #[test]
    fn if_else_expression() {
        let expr = parse_expr("if (x < y) { x } else { y }");

        let Expression::If(_, consequence, Some(alternative)) = expr else {
            panic!("expected an if/else expression, got {expr:?}");
        };
        assert_eq!(consequence.to_string(), "{x;}");
        assert_eq!(alternative.to_string(), "{y;}");
    }

    #[test]
    fn function_literals() {
        let expr = parse_expr("func(x, y) { x + y; }");

        let Expression::FunctionLiteral(parameters, body) = expr else {
            panic!("expected a function literal, got {expr:?}");
        };
        assert_eq!(
            parameters,
            vec![Identifier::new("x"), Identifier::new("y")]
        );
        assert_eq!(body.to_string(), "{(x + y);}");

        for (code, expected) in [
            ("func() {};", vec![]),
            ("func(x) {};", vec!["x"]),
            ("func(x, y, z) {};", vec!["x", "y", "z"]),
        ] {
            let Expression::FunctionLiteral(parameters, _) = parse_expr(code) else {
                panic!("expected a function literal for {code:?}");
            };
            let expected: Vec<Identifier> = expected.into_iter().map(Identifier::new).collect();
            assert_eq!(parameters, expected, "code: {code:?}");
        }
    }

    #[test]
    fn call_expressions() {
        let expr = parse_expr("add(1, 2 * 3, 4 + 5)");

        let Expression::Call(callee, arguments) = expr else {
            panic!("expected a call expression, got {expr:?}");
        };
        assert_eq!(
            *callee,
            Expression::Identifier(Identifier::new("add"))
        );
        assert_eq!(arguments.len(), 3);
        assert_eq!(arguments[0], Expression::IntegerLiteral(1));
        assert_eq!(arguments[1].to_string(), "(2 * 3)");
        assert_eq!(arguments[2].to_string(), "(4 + 5)");

        let Expression::Call(callee, arguments) = parse_expr("func(x) { x; }(5)") else {
            panic!("expected an immediately-called function literal");
        };
        assert_eq!(callee.to_string(), "func(x) {x;}");
        assert_eq!(arguments, vec![Expression::IntegerLiteral(5)]);
    }

    #[test]
    fn string_literals() {
        assert_eq!(
            parse_expr("\"hello world\""),
            Expression::StringLiteral("hello world".to_string())
        );

        let Expression::Infix(left, InfixOperator::Plus, right) =
            parse_expr("\"Hello\" + \"World\"")
        else {
            panic!("expected string concatenation");
        };
        assert_eq!(*left, Expression::StringLiteral("Hello".to_string()));
        assert_eq!(*right, Expression::StringLiteral("World".to_string()));
    }

    #[test]
    fn unmet_token_expectations() {
        let errors = Parser::parse("let x 5;").unwrap_err();
        assert_eq!(
            errors,
            vec!["expected next token to be ASSIGN, got INT instead".to_string()]
        );

        let errors = Parser::parse("let = 5;").unwrap_err();
        assert_eq!(
            errors[0],
            "expected next token to be IDENTIFIER, got ASSIGN instead"
        );
    }

    #[test]
    fn missing_prefix_parser() {
        let errors = Parser::parse("5 + * 5;").unwrap_err();
        assert_eq!(errors, vec!["no prefix parse function for *".to_string()]);
    }

    #[test]
    fn integer_literal_overflow() {
        let errors = Parser::parse("92233720368547758199;").unwrap_err();
        assert_eq!(
            errors,
            vec!["cannot parse 92233720368547758199 as int64".to_string()]
        );
    }

    #[test]
    fn errors_accumulate_and_parsing_continues() {
        // Three bad let statements; the second one cascades into a fourth
        // error when the orphaned `=` is retried in expression position.
        let errors = Parser::parse("let x 5; let = 10; let 838383;").unwrap_err();
        assert_eq!(
            errors,
            vec![
                "expected next token to be ASSIGN, got INT instead".to_string(),
                "expected next token to be IDENTIFIER, got ASSIGN instead".to_string(),
                "no prefix parse function for =".to_string(),
                "expected next token to be IDENTIFIER, got INT instead".to_string(),
            ]
        );
    }

    #[test]
    fn totality_on_empty_input() {
        let program = parse("");
        assert_eq!(program.statements, vec![]);
        assert_eq!(program.token_literal(), "");
    }
}
