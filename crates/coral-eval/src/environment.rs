//! Variable environments and evaluation scopes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// A shared handle to an environment. Evaluation never crosses threads, so
/// `Rc<RefCell<_>>` rather than a lock.
pub type EnvRef = Rc<RefCell<Environment>>;

/// Variable bindings for one evaluation scope.
///
/// The map is flat: name resolution never consults an enclosing
/// environment. Method bodies get a fresh environment and fall back to
/// receiver dispatch instead.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.store.get(name).cloned()
    }

    /// Bind or rebind a name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}

/// Pairing of a variable environment and the current receiver (`self`)
/// against which an expression is evaluated.
///
/// A scope is owned by whatever created it; the evaluator only reads and
/// writes through it.
#[derive(Debug, Clone)]
pub struct Scope {
    pub env: EnvRef,
    /// The current receiver. Identifier dispatch targets this value when no
    /// matching variable is bound.
    pub receiver: Value,
}

impl Scope {
    pub fn new(env: EnvRef, receiver: Value) -> Self {
        Scope { env, receiver }
    }
}
