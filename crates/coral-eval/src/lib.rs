//! Tree-walking evaluator for the Coral scripting language.
//!
//! Coral is dynamically typed and class-based. This crate takes parsed
//! expression nodes and an evaluation scope and produces runtime values:
//! operator semantics over the primitive kinds, conditional branching, and
//! the resolution protocol that decides whether a bare name is a local
//! variable, a class-level method call, or an instance-level method call.
//!
//! Runtime errors are ordinary [`Value`]s that short-circuit upward through
//! the expression tree. Early `return`s out of method bodies are modeled as
//! the `Err` side of [`Flow`] and propagate using Rust's `?` operator, so
//! the two never mix.

mod environment;
mod error;
mod eval;
mod interpreter;
mod object;
mod runtime;
mod value;

pub use environment::{EnvRef, Environment, Scope};
pub use error::RuntimeError;
pub use eval::{
    eval_binary, eval_block, eval_constant, eval_expr, eval_identifier, eval_if,
    eval_instance_variable, eval_statement, eval_unary, invoke_class_method,
    invoke_instance_method, unwrap_return, EarlyReturn, Flow,
};
pub use interpreter::Interpreter;
pub use object::{Class, ClassRef, Instance, ObjectRef};
pub use runtime::Runtime;
pub use value::{BooleanValue, IntegerValue, Kind, NullValue, StringValue, Value};
