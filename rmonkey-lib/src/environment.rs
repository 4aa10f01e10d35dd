//! This module provides [`Environment`].

use crate::object::Object;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// A frame of bindings, with a pointer to the frame it lexically encloses.
///
/// Together the frames form a scope chain. The chain is shared: every
/// closure and call frame that references an environment keeps it alive, so
/// an escaped closure may outlive the call that created it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    /// The environment being enclosed by this one.
    enclosing: Option<Rc<RefCell<Environment>>>,

    /// A map of binding names to their values.
    values: HashMap<String, Object>,
}

impl Environment {
    /// Create a new environment enclosing the given environment.
    pub fn enclosing(enclosing: Option<Rc<RefCell<Self>>>) -> Self {
        Self {
            enclosing,
            values: HashMap::new(),
        }
    }

    /// Get the value of the given name, walking out through the enclosing
    /// environments until the first hit.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.values.get(name) {
            Some(value.clone())
        } else if let Some(env) = &self.enclosing {
            env.borrow().get(name)
        } else {
            None
        }
    }

    /// Bind a name in this environment.
    ///
    /// Bindings always go to the innermost frame: a name bound in an
    /// enclosing environment is shadowed, never rebound.
    pub fn define(&mut self, name: String, value: Object) {
        self.values.insert(name, value);
    }
}
