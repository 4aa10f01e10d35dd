//! This module handles the AST.
//!
//! Every node renders back to source text through [`fmt::Display`]. The
//! rendered form is deterministic and parenthesizes every prefix and infix
//! expression, so operator precedence is always explicit in the output.

use std::fmt;

/// An infix operator - includes arithmetic, comparison, and equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::missing_docs_in_private_items)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Plus => "+",
                Self::Minus => "-",
                Self::Asterisk => "*",
                Self::Slash => "/",
                Self::Lt => "<",
                Self::Gt => ">",
                Self::Eq => "==",
                Self::NotEq => "!=",
            }
        )
    }
}

/// A prefix operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::missing_docs_in_private_items)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Bang => "!",
                Self::Minus => "-",
            }
        )
    }
}

/// The name of a binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    /// The name itself.
    pub name: String,
}

impl Identifier {
    /// Create a new identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The root of the AST: an ordered sequence of statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    /// The statements of the program, in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// The literal text of the program's defining token: that of its first
    /// statement, or the empty string for an empty program.
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map_or_else(String::new, Statement::token_literal)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// A list of all the possible statements.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// (name, value).
    Let(Identifier, Expression),

    /// The returned expression, or `None` for a bare `return;`, which
    /// returns null.
    Return(Option<Expression>),

    /// A bare expression in statement position.
    Expression(Expression),
}

impl Statement {
    /// The literal text of the statement's defining token.
    pub fn token_literal(&self) -> String {
        match self {
            Self::Let(_, _) => "let".to_string(),
            Self::Return(_) => "return".to_string(),
            Self::Expression(expr) => expr.token_literal(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let(name, value) => write!(f, "let {name} = {value};"),
            Self::Return(Some(value)) => write!(f, "return {value};"),
            Self::Return(None) => write!(f, "return;"),
            Self::Expression(expr) => write!(f, "{expr};"),
        }
    }
}

/// A brace-delimited sequence of statements.
///
/// Blocks are only ever reachable through [`Expression::If`] and
/// [`Expression::FunctionLiteral`]; the language has no free-standing
/// block statement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    /// The statements of the block, in source order.
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        write!(f, "}}")
    }
}

/// A list of all the possible expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// A reference to a binding.
    Identifier(Identifier),

    /// A 64-bit signed integer literal.
    IntegerLiteral(i64),

    /// A boolean literal.
    Boolean(bool),

    /// A string literal.
    StringLiteral(String),

    /// (operator, right).
    Prefix(PrefixOperator, Box<Expression>),

    /// (left, operator, right).
    Infix(Box<Expression>, InfixOperator, Box<Expression>),

    /// (condition, consequence, alternative).
    If(Box<Expression>, Block, Option<Block>),

    /// (parameters, body).
    FunctionLiteral(Vec<Identifier>, Block),

    /// (callee, arguments).
    Call(Box<Expression>, Vec<Expression>),
}

impl Expression {
    /// The literal text of the expression's defining token.
    pub fn token_literal(&self) -> String {
        match self {
            Self::Identifier(identifier) => identifier.name.clone(),
            Self::IntegerLiteral(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::StringLiteral(value) => value.clone(),
            Self::Prefix(operator, _) => operator.to_string(),
            Self::Infix(_, operator, _) => operator.to_string(),
            Self::If(_, _, _) => "if".to_string(),
            Self::FunctionLiteral(_, _) => "func".to_string(),
            Self::Call(_, _) => "(".to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::IntegerLiteral(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::StringLiteral(value) => write!(f, "{value}"),
            Self::Prefix(operator, right) => write!(f, "({operator}{right})"),
            Self::Infix(left, operator, right) => write!(f, "({left} {operator} {right})"),
            Self::If(condition, consequence, alternative) => {
                write!(f, "if ( {condition} )  {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, "else {alternative}")?;
                }
                Ok(())
            }
            Self::FunctionLiteral(parameters, body) => {
                let parameters: Vec<String> =
                    parameters.iter().map(ToString::to_string).collect();
                write!(f, "func({}) {body}", parameters.join(", "))
            }
            Self::Call(callee, arguments) => {
                let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{callee}({})", arguments.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_let_statement() {
        let program = Program {
            statements: vec![Statement::Let(
                Identifier::new("myVar"),
                Expression::Identifier(Identifier::new("anotherVar")),
            )],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn render_nested_expressions() {
        // -a * b, with the tree built by hand
        let expr = Expression::Infix(
            Box::new(Expression::Prefix(
                PrefixOperator::Minus,
                Box::new(Expression::Identifier(Identifier::new("a"))),
            )),
            InfixOperator::Asterisk,
            Box::new(Expression::Identifier(Identifier::new("b"))),
        );

        assert_eq!(expr.to_string(), "((-a) * b)");
    }

    #[test]
    fn render_if_and_function() {
        let consequence = Block {
            statements: vec![Statement::Expression(Expression::Identifier(
                Identifier::new("x"),
            ))],
        };
        let alternative = Block {
            statements: vec![Statement::Return(Some(Expression::IntegerLiteral(1)))],
        };

        let if_expr = Expression::If(
            Box::new(Expression::Infix(
                Box::new(Expression::Identifier(Identifier::new("x"))),
                InfixOperator::Lt,
                Box::new(Expression::IntegerLiteral(2)),
            )),
            consequence.clone(),
            Some(alternative),
        );
        assert_eq!(if_expr.to_string(), "if ( (x < 2) )  {x;}else {return 1;}");

        let func = Expression::FunctionLiteral(
            vec![Identifier::new("x"), Identifier::new("y")],
            Block {
                statements: vec![Statement::Expression(Expression::Infix(
                    Box::new(Expression::Identifier(Identifier::new("x"))),
                    InfixOperator::Plus,
                    Box::new(Expression::Identifier(Identifier::new("y"))),
                ))],
            },
        );
        assert_eq!(func.to_string(), "func(x, y) {(x + y);}");
    }
}
