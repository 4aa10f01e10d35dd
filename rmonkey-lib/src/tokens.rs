//! This module handles tokens.

use std::fmt;

/// A single token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// The type of the token.
    pub token_type: TokenType,

    /// The exact source text that produced the token.
    ///
    /// For [`Int`](TokenType::Int) this is the decimal digits, for
    /// [`Identifier`](TokenType::Identifier) the name, for operators the
    /// glyph, for [`String`](TokenType::String) the interior of the quoted
    /// literal, and for [`Eof`](TokenType::Eof) the empty string.
    pub literal: String,
}

impl Token {
    /// Create a new token.
    pub fn new(token_type: TokenType, literal: impl Into<String>) -> Self {
        Self {
            token_type,
            literal: literal.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {:?})", self.token_type, self.literal)
    }
}

/// A list of all possible Monkey tokens.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenType {
    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Function,
    Let,
    If,
    Else,
    Return,
    True,
    False,

    // Literals
    Identifier,
    Int,
    String,

    Illegal,
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Assign => "ASSIGN",
                Self::Plus => "PLUS",
                Self::Minus => "MINUS",
                Self::Bang => "BANG",
                Self::Asterisk => "ASTERISK",
                Self::Slash => "SLASH",
                Self::Lt => "LT",
                Self::Gt => "GT",
                Self::Eq => "EQ",
                Self::NotEq => "NOTEQ",
                Self::Comma => "COMMA",
                Self::Semicolon => "SEMICOLON",
                Self::LParen => "LPAREN",
                Self::RParen => "RPAREN",
                Self::LBrace => "LBRACE",
                Self::RBrace => "RBRACE",
                Self::Function => "FUNCTION",
                Self::Let => "LET",
                Self::If => "IF",
                Self::Else => "ELSE",
                Self::Return => "RETURN",
                Self::True => "TRUE",
                Self::False => "FALSE",
                Self::Identifier => "IDENTIFIER",
                Self::Int => "INT",
                Self::String => "STRING",
                Self::Illegal => "ILLEGAL",
                Self::Eof => "EOF",
            }
        )
    }
}

/// Classify a letter-string as a keyword or an identifier.
pub fn lookup_identifier(literal: &str) -> TokenType {
    match literal {
        "func" => TokenType::Function,
        "let" => TokenType::Let,
        "if" => TokenType::If,
        "else" => TokenType::Else,
        "return" => TokenType::Return,
        "true" => TokenType::True,
        "false" => TokenType::False,
        _ => TokenType::Identifier,
    }
}
