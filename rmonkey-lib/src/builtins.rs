//! This module provides the built-in functions exposed to Monkey code.

use crate::{interpreter::RuntimeError, object::Object};
use lazy_static::lazy_static;
use std::{collections::HashMap, fmt};

/// A function provided by the host, callable from Monkey code.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// The name that the function is reachable under.
    name: &'static str,

    /// The host implementation.
    func: fn(&[Object]) -> Result<Object, RuntimeError>,
}

impl Builtin {
    /// The name of this built-in.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the built-in with already-evaluated arguments.
    pub fn call(&self, arguments: &[Object]) -> Result<Object, RuntimeError> {
        (self.func)(arguments)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

lazy_static! {
    /// The table of built-in functions, consulted after a failed
    /// environment lookup.
    static ref BUILTINS: HashMap<&'static str, Builtin> =
        HashMap::from([("len", Builtin { name: "len", func: len })]);
}

/// Look up a built-in function by name.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.get(name).copied()
}

/// `len(string)`: the length of the string in bytes.
fn len(arguments: &[Object]) -> Result<Object, RuntimeError> {
    let [argument] = arguments else {
        return Err(RuntimeError::new(format!(
            "wrong number of arguments: want=1, got={}",
            arguments.len()
        )));
    };

    match argument {
        Object::String(value) => Ok(Object::Integer(value.len() as i64)),
        other => Err(RuntimeError::new(format!(
            "argument to \"len\" not supported: got {}",
            other.type_name()
        ))),
    }
}
