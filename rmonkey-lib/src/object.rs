//! This module provides [`Object`].

use crate::{
    ast::{Block, Identifier},
    builtins::Builtin,
    environment::Environment,
};
use std::{cell::RefCell, fmt, rc::Rc};

/// Possible runtime values in Monkey.
#[derive(Clone, Debug)]
#[allow(clippy::missing_docs_in_private_items)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Function(Rc<Function>),
    Builtin(Builtin),
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl Object {
    /// Get the name of the type of this object, as used in runtime error
    /// messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::String(_) => "STRING",
            Self::Null => "NULL",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN_FUNCTION",
        }
    }

    /// Is this object truthy?
    ///
    /// Only `false` and `null` are falsy; every integer (including 0),
    /// every string, and every function is truthy.
    pub fn is_truthy(&self) -> bool {
        #[allow(clippy::match_like_matches_macro, reason = "This is much clearer")]
        match self {
            Self::Null | Self::Boolean(false) => false,
            _ => true,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Builtin(_) => write!(f, "built-in function"),
        }
    }
}

/// A function that was defined by user Monkey code.
#[derive(Clone)]
pub struct Function {
    /// The parameters that this function takes.
    pub parameters: Vec<Identifier>,

    /// The body of the function.
    pub body: Block,

    /// The environment that the function was defined in.
    pub env: Rc<RefCell<Environment>>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The environment is omitted: it may contain this very function.
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters: Vec<String> = self.parameters.iter().map(ToString::to_string).collect();
        write!(f, "func({}) {}", parameters.join(", "), self.body)
    }
}
