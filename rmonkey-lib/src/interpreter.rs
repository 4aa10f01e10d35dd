//! This module provides the tree-walking [`Interpreter`].

use crate::{
    ast::{Block, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement},
    builtins,
    environment::Environment,
    object::{Function, Object},
};
use std::{cell::RefCell, rc::Rc};
use thiserror::Error;

/// An error encountered by the interpreter at runtime.
///
/// Runtime errors are first-class values of the language: they flow out of
/// the evaluation like a `return` does, are shown to the user in their
/// `Display` form, and never abort the interpreter process.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("Error: {message}")]
pub struct RuntimeError {
    /// The error message.
    pub message: String,
}

impl RuntimeError {
    /// Create a new runtime error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A runtime error has occured or we need to return from a function call.
///
/// Both variants unwind out of nested blocks untouched. [`Return`] is
/// unwrapped at exactly two places: the end of a function call's body and
/// the top of the program.
///
/// [`Return`]: ErrorOrReturn::Return
pub enum ErrorOrReturn {
    /// A [`RuntimeError`] has occured.
    Error(RuntimeError),

    /// Return from the current function.
    Return(Object),
}

impl From<RuntimeError> for ErrorOrReturn {
    fn from(value: RuntimeError) -> Self {
        Self::Error(value)
    }
}

/// A result wrapping [`ErrorOrReturn`].
type Result<T, E = ErrorOrReturn> = ::std::result::Result<T, E>;

/// A tree-walk Monkey interpreter.
#[derive(Clone, Copy, Debug)]
pub struct Interpreter;

impl Interpreter {
    /// Evaluate the given program against the given environment.
    ///
    /// Statements are evaluated in order and the last value (or `null` for
    /// an empty program) is the result. A top-level `return` stops the
    /// program and yields its value; a runtime error stops the program and
    /// becomes the `Err` result.
    pub fn interpret(
        program: &Program,
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Object, RuntimeError> {
        let mut result = Object::Null;

        for statement in &program.statements {
            match Self::execute_statement(statement, env) {
                Ok(value) => result = value,
                Err(ErrorOrReturn::Return(value)) => return Ok(value),
                Err(ErrorOrReturn::Error(error)) => return Err(error),
            }
        }

        Ok(result)
    }

    /// Execute the given statement.
    fn execute_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Result<Object> {
        match statement {
            Statement::Let(name, value) => {
                let value = Self::evaluate_expression(value, env)?;
                env.borrow_mut().define(name.name.clone(), value);
                Ok(Object::Null)
            }
            Statement::Return(value) => {
                let value = match value {
                    Some(expr) => Self::evaluate_expression(expr, env)?,
                    None => Object::Null,
                };
                Err(ErrorOrReturn::Return(value))
            }
            Statement::Expression(expr) => Self::evaluate_expression(expr, env),
        }
    }

    /// Execute the statements of a block in order, yielding the last value.
    ///
    /// Unlike [`interpret`](Self::interpret), a `return` is not unwrapped
    /// here: it keeps unwinding through any enclosing blocks so that a
    /// `return` inside a nested `if` still exits the enclosing function.
    fn execute_block(block: &Block, env: &Rc<RefCell<Environment>>) -> Result<Object> {
        let mut result = Object::Null;

        for statement in &block.statements {
            result = Self::execute_statement(statement, env)?;
        }

        Ok(result)
    }

    /// Evaluate the given expression.
    fn evaluate_expression(expr: &Expression, env: &Rc<RefCell<Environment>>) -> Result<Object> {
        match expr {
            Expression::Identifier(identifier) => Self::evaluate_identifier(identifier, env),
            Expression::IntegerLiteral(value) => Ok(Object::Integer(*value)),
            Expression::Boolean(value) => Ok(Object::Boolean(*value)),
            Expression::StringLiteral(value) => Ok(Object::String(value.clone())),
            Expression::Prefix(operator, right) => {
                let operand = Self::evaluate_expression(right, env)?;
                Ok(Self::evaluate_prefix_expression(*operator, &operand)?)
            }
            Expression::Infix(left, operator, right) => {
                let left = Self::evaluate_expression(left, env)?;
                let right = Self::evaluate_expression(right, env)?;
                Ok(Self::evaluate_infix_expression(*operator, &left, &right)?)
            }
            Expression::If(condition, consequence, alternative) => {
                Self::evaluate_if_expression(condition, consequence, alternative.as_ref(), env)
            }
            Expression::FunctionLiteral(parameters, body) => {
                Ok(Object::Function(Rc::new(Function {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: Rc::clone(env),
                })))
            }
            Expression::Call(callee, arguments) => {
                let callee = Self::evaluate_expression(callee, env)?;

                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(Self::evaluate_expression(argument, env)?);
                }

                Self::call_function(callee, args)
            }
        }
    }

    /// Evaluate an identifier: the environment chain first, then the
    /// built-in table.
    fn evaluate_identifier(
        identifier: &Identifier,
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Object> {
        if let Some(value) = env.borrow().get(&identifier.name) {
            Ok(value)
        } else if let Some(builtin) = builtins::lookup(&identifier.name) {
            Ok(Object::Builtin(builtin))
        } else {
            Err(RuntimeError::new(format!("identifier not found: {}", identifier.name)).into())
        }
    }

    /// Evaluate a prefix expression on an already-evaluated operand.
    fn evaluate_prefix_expression(
        operator: PrefixOperator,
        operand: &Object,
    ) -> Result<Object, RuntimeError> {
        match operator {
            PrefixOperator::Bang => Ok(Object::Boolean(!operand.is_truthy())),
            PrefixOperator::Minus => match operand {
                Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
                other => Err(RuntimeError::new(format!(
                    "invalid prefix operator \"-\" for operand type {}",
                    other.type_name()
                ))),
            },
        }
    }

    /// Evaluate an infix expression on already-evaluated operands.
    fn evaluate_infix_expression(
        operator: InfixOperator,
        left: &Object,
        right: &Object,
    ) -> Result<Object, RuntimeError> {
        use InfixOperator::*;

        if left.type_name() != right.type_name() {
            return Err(RuntimeError::new(format!(
                "operand type mismatch for operator \"{operator}\" : {} {operator} {}",
                left.type_name(),
                right.type_name()
            )));
        }

        match (left, right) {
            (Object::Integer(a), Object::Integer(b)) => {
                Self::evaluate_integer_infix_expression(operator, *a, *b)
            }
            (Object::String(a), Object::String(b)) => match operator {
                Plus => Ok(Object::String(format!("{a}{b}"))),
                _ => Err(invalid_operator_error(operator, left, right)),
            },
            _ => match operator {
                Eq => Ok(Object::Boolean(left == right)),
                NotEq => Ok(Object::Boolean(left != right)),
                _ => Err(invalid_operator_error(operator, left, right)),
            },
        }
    }

    /// Evaluate an infix expression between two integers.
    ///
    /// Arithmetic wraps around on 64-bit overflow; it never panics.
    fn evaluate_integer_infix_expression(
        operator: InfixOperator,
        left: i64,
        right: i64,
    ) -> Result<Object, RuntimeError> {
        use InfixOperator::*;

        Ok(match operator {
            Plus => Object::Integer(left.wrapping_add(right)),
            Minus => Object::Integer(left.wrapping_sub(right)),
            Asterisk => Object::Integer(left.wrapping_mul(right)),
            Slash => {
                if right == 0 {
                    return Err(RuntimeError::new("division by zero"));
                }
                // wrapping_div covers the remaining overflow, i64::MIN / -1
                Object::Integer(left.wrapping_div(right))
            }
            Lt => Object::Boolean(left < right),
            Gt => Object::Boolean(left > right),
            Eq => Object::Boolean(left == right),
            NotEq => Object::Boolean(left != right),
        })
    }

    /// Evaluate an if expression by evaluating one (or neither) of its
    /// blocks, based on the truthiness of the condition.
    fn evaluate_if_expression(
        condition: &Expression,
        consequence: &Block,
        alternative: Option<&Block>,
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Object> {
        let condition = Self::evaluate_expression(condition, env)?;

        if condition.is_truthy() {
            Self::execute_block(consequence, env)
        } else if let Some(alternative) = alternative {
            Self::execute_block(alternative, env)
        } else {
            Ok(Object::Null)
        }
    }

    /// Apply a function to already-evaluated arguments.
    ///
    /// A user-defined function runs in a fresh environment enclosed by the
    /// environment it captured at its definition, never the caller's; its
    /// parameters are bound positionally. A `return` out of the body is
    /// unwrapped here.
    fn call_function(callee: Object, arguments: Vec<Object>) -> Result<Object> {
        match callee {
            Object::Function(function) => {
                let mut env = Environment::enclosing(Some(Rc::clone(&function.env)));
                for (parameter, argument) in function.parameters.iter().zip(arguments) {
                    env.define(parameter.name.clone(), argument);
                }
                let env = Rc::new(RefCell::new(env));

                match Self::execute_block(&function.body, &env) {
                    Err(ErrorOrReturn::Return(value)) => Ok(value),
                    other => other,
                }
            }
            Object::Builtin(builtin) => Ok(builtin.call(&arguments)?),
            other => {
                Err(RuntimeError::new(format!("not a function: {}", other.type_name())).into())
            }
        }
    }
}

/// Build the error for an operator that is not defined between two values
/// of the same type.
fn invalid_operator_error(operator: InfixOperator, left: &Object, right: &Object) -> RuntimeError {
    RuntimeError::new(format!(
        "invalid operator \"{operator}\" between {} values: {left} {operator} {right}",
        left.type_name()
    ))
}
