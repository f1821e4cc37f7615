//! Top-level interpreter: owns the runtime and the root scope.

use std::rc::Rc;

use coral_ast::Program;

use crate::environment::{Environment, Scope};
use crate::eval::{eval_statement, EarlyReturn};
use crate::object::Instance;
use crate::runtime::Runtime;
use crate::value::Value;

/// The Coral interpreter.
///
/// Top-level code evaluates against a `main` object — a fresh instance of
/// `Object` installed as the root receiver, so bare names at the top level
/// dispatch like instance methods.
#[derive(Debug)]
pub struct Interpreter {
    runtime: Runtime,
    scope: Scope,
}

impl Interpreter {
    /// Create an interpreter with a fresh runtime and root scope.
    pub fn new() -> Self {
        let runtime = Runtime::new();
        let main = Instance::new(Rc::clone(&runtime.object_class));
        let scope = Scope::new(Environment::new(), Value::Object(main));
        Interpreter { runtime, scope }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// The root scope; embedders and tests seed bindings through it.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Evaluate a program statement by statement.
    ///
    /// Stops at the first error value and returns it; a top-level `return`
    /// yields its value. An empty program evaluates to `null`.
    pub fn eval(&mut self, program: &Program) -> Value {
        let mut result = self.runtime.null();
        for statement in &program.statements {
            match eval_statement(&self.runtime, statement, &self.scope) {
                Ok(value) => {
                    if value.is_error() {
                        return value;
                    }
                    result = value;
                }
                Err(EarlyReturn(value)) => return value,
            }
        }
        result
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}
